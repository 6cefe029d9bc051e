use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppError,
    application::use_cases::audit_log::NewAuditEntry,
    domain::entities::api_client::ClientType,
};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Requests outside this prefix (health, docs) are not audited.
const AUDITED_PREFIX: &str = "/api";

const UNKNOWN_CLIENT: &str = "UNKNOWN";
const KEY_PREFIX_LEN: usize = 8;

/// Client identity resolved by the auth gate, readable by downstream
/// handlers and by the access logger.
#[derive(Debug, Clone)]
pub struct ApiClientContext {
    pub id: Uuid,
    pub client_name: String,
    pub client_type: Option<ClientType>,
}

/// Auth gate. Layered onto the protected routers only; the admin management
/// router is composed outside this layer and bypasses validation entirely.
pub async fn api_key_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    if api_key.is_empty() {
        tracing::warn!(method = %request.method(), uri = %request.uri(), "API key missing");
        return Err(AppError::MissingApiKey);
    }

    let Some(client) = app_state.api_client_use_cases.validate_key(&api_key).await? else {
        tracing::warn!(key_prefix = %redact_key(&api_key), "invalid API key attempted");
        return Err(AppError::InvalidApiKey);
    };

    tracing::info!(
        client = %client.client_name,
        client_type = ?client.client_type.map(|t| t.as_str()),
        method = %request.method(),
        uri = %request.uri(),
        "authenticated client"
    );

    let ctx = ApiClientContext {
        id: client.id,
        client_name: client.client_name,
        client_type: client.client_type,
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;

    // Mirror the identity onto the response so the outer access-log layer
    // can attribute the request after the inner stack consumed it.
    response.extensions_mut().insert(ctx);

    Ok(response)
}

/// Access logger. Layered over the whole app, outside the auth gate, so it
/// observes every `/api` request exactly once, including the ones the gate
/// rejected.
pub async fn request_audit(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(AUDITED_PREFIX) {
        return next.run(request).await;
    }

    let started = Instant::now();

    let method = request.method().to_string();
    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let client_ip = resolve_client_ip(request.headers(), remote_addr);
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let key_prefix = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(redact_key);

    let response = next.run(request).await;

    let execution_time_ms = started.elapsed().as_millis() as i64;
    let status = response.status().as_u16() as i32;
    let client_name = response
        .extensions()
        .get::<ApiClientContext>()
        .map(|ctx| ctx.client_name.clone())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    tracing::info!(
        client = %client_name,
        method = %method,
        uri = %uri,
        status,
        execution_time_ms,
        "api request"
    );

    let entry = NewAuditEntry {
        timestamp: chrono::Utc::now().naive_utc(),
        method,
        uri,
        request_summary: request_summary(&client_name, key_prefix.as_deref()),
        response_status: status,
        execution_time_ms,
        client_ip,
        user_agent,
    };

    // Best effort: an audit write failure must never fail the request.
    if let Err(err) = app_state.audit_log_use_cases.record(entry).await {
        tracing::error!(error = %err, "failed to persist audit entry");
    }

    response
}

fn request_summary(client_name: &str, key_prefix: Option<&str>) -> String {
    match key_prefix {
        Some(prefix) => format!("Client: {client_name}, API Key: {prefix}"),
        None => format!("Client: {client_name}"),
    }
}

/// A short traceability prefix; never the full key.
fn redact_key(key: &str) -> String {
    let end = key
        .char_indices()
        .nth(KEY_PREFIX_LEN)
        .map(|(i, _)| i)
        .unwrap_or(key.len());
    format!("{}...", &key[..end])
}

const FORWARDED_HEADERS: [&str; 3] = ["x-forwarded-for", "proxy-client-ip", "wl-proxy-client-ip"];

/// First usable value from the proxy header chain, falling back to the
/// transport-level remote address. Empty and "unknown" values don't count.
fn resolve_client_ip(headers: &HeaderMap, remote_addr: Option<String>) -> String {
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(name)
            && let Ok(value) = value.to_str()
            && let Some(first) = value.split(',').next()
        {
            let trimmed = first.trim();
            if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("unknown") {
                return trimmed.to_string();
            }
        }
    }
    remote_addr.unwrap_or_else(|| "unknown".to_string())
}
