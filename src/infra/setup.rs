use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        actor::{ActorRepo, ActorUseCases},
        api_client::{ApiClientRepo, ApiClientUseCases},
        audit_log::{AuditLogRepo, AuditLogUseCases},
        film::{FilmRepo, FilmUseCases},
    },
    infra::{config::AppConfig, postgres_persistence},
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let api_client_repo = postgres_arc.clone() as Arc<dyn ApiClientRepo>;
    let film_repo = postgres_arc.clone() as Arc<dyn FilmRepo>;
    let actor_repo = postgres_arc.clone() as Arc<dyn ActorRepo>;
    let audit_log_repo = postgres_arc.clone() as Arc<dyn AuditLogRepo>;

    Ok(AppState {
        config: Arc::new(config),
        api_client_use_cases: Arc::new(ApiClientUseCases::new(api_client_repo)),
        film_use_cases: Arc::new(FilmUseCases::new(film_repo)),
        actor_use_cases: Arc::new(ActorUseCases::new(actor_repo)),
        audit_log_use_cases: Arc::new(AuditLogUseCases::new(audit_log_repo)),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cinegate=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
