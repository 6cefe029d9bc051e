pub mod actors;
pub mod admin;
pub mod films;
pub mod logs;

use axum::Router;

use crate::adapters::http::{app_state::AppState, middleware::api_key_auth};

/// The `/api` router. Client management is nested outside the auth layer
/// (it is how keys get issued in the first place); everything else requires
/// a valid `X-API-Key`.
pub fn router(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/films", films::router())
        .nest("/actors", actors::router())
        .nest("/logs", logs::router())
        .layer(axum::middleware::from_fn_with_state(app_state, api_key_auth));

    Router::new()
        .nest("/admin/clients", admin::router())
        .merge(protected)
}
