use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    domain::entities::audit_entry::AuditEntry,
};

const DEFAULT_SLOW_THRESHOLD_MS: i64 = 1000;

/// Audit-log query surface for operational tooling. The auth layer is
/// applied in `routes::router` when nesting this router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_logs))
        .route("/date-range", get(logs_by_date_range))
        .route("/slow-requests", get(slow_requests))
        .route("/method/{method}", get(logs_by_method))
        .route("/status/{status}", get(logs_by_status))
}

#[derive(Serialize)]
struct LogEntryResponse {
    id: Uuid,
    timestamp: NaiveDateTime,
    method: String,
    uri: String,
    request_summary: String,
    response_status: i32,
    execution_time_ms: i64,
    client_ip: String,
    user_agent: Option<String>,
}

fn entry_response(entry: AuditEntry) -> LogEntryResponse {
    LogEntryResponse {
        id: entry.id,
        timestamp: entry.timestamp,
        method: entry.method,
        uri: entry.uri,
        request_summary: entry.request_summary,
        response_status: entry.response_status,
        execution_time_ms: entry.execution_time_ms,
        client_ip: entry.client_ip,
        user_agent: entry.user_agent,
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    keyword: String,
}

#[derive(Deserialize)]
struct DateRangeQuery {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
}

#[derive(Deserialize)]
struct SlowRequestsQuery {
    threshold_ms: Option<i64>,
}

async fn search_logs(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = app_state.audit_log_use_cases.search(&query.keyword).await?;

    Ok(Json(entries.into_iter().map(entry_response).collect::<Vec<_>>()))
}

async fn logs_by_date_range(
    State(app_state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = app_state
        .audit_log_use_cases
        .find_by_date_range(query.start_date, query.end_date)
        .await?;

    Ok(Json(entries.into_iter().map(entry_response).collect::<Vec<_>>()))
}

async fn slow_requests(
    State(app_state): State<AppState>,
    Query(query): Query<SlowRequestsQuery>,
) -> AppResult<impl IntoResponse> {
    let threshold_ms = query.threshold_ms.unwrap_or(DEFAULT_SLOW_THRESHOLD_MS);

    let entries = app_state
        .audit_log_use_cases
        .find_slow_requests(threshold_ms)
        .await?;

    Ok(Json(entries.into_iter().map(entry_response).collect::<Vec<_>>()))
}

async fn logs_by_method(
    State(app_state): State<AppState>,
    Path(method): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entries = app_state.audit_log_use_cases.find_by_method(&method).await?;

    Ok(Json(entries.into_iter().map(entry_response).collect::<Vec<_>>()))
}

async fn logs_by_status(
    State(app_state): State<AppState>,
    Path(status): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let entries = app_state.audit_log_use_cases.find_by_status(status).await?;

    Ok(Json(entries.into_iter().map(entry_response).collect::<Vec<_>>()))
}
