use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::use_cases::api_client::ApiClientUpdate,
    domain::entities::api_client::{ApiClient, ClientStatus, ClientType},
};

/// Client management endpoints. Composed outside the auth layer in
/// `routes::router`; no API key is required here.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/active", get(list_active_clients))
        .route("/type/{client_type}", get(list_clients_by_type))
        .route(
            "/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/{id}/rotate-key", post(rotate_key))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
struct ClientResponse {
    id: Uuid,
    client_name: String,
    api_key: String,
    description: Option<String>,
    status: &'static str,
    created_at: chrono::NaiveDateTime,
    last_used_at: Option<chrono::NaiveDateTime>,
    request_count: i64,
    contact_email: Option<String>,
    client_type: Option<&'static str>,
}

fn client_response(client: ApiClient) -> ClientResponse {
    ClientResponse {
        id: client.id,
        client_name: client.client_name,
        api_key: client.api_key,
        description: client.description,
        status: client.status.as_str(),
        created_at: client.created_at,
        last_used_at: client.last_used_at,
        request_count: client.request_count,
        contact_email: client.contact_email,
        client_type: client.client_type.map(|t| t.as_str()),
    }
}

#[derive(Deserialize)]
struct CreateClientPayload {
    client_name: String,
    description: Option<String>,
    contact_email: Option<String>,
    client_type: Option<String>,
}

#[derive(Deserialize)]
struct UpdateClientPayload {
    client_name: String,
    description: Option<String>,
    status: String,
    contact_email: Option<String>,
    client_type: Option<String>,
}

fn parse_client_type(value: Option<&str>) -> AppResult<Option<ClientType>> {
    match value {
        None => Ok(None),
        Some(s) => ClientType::from_str(s).map(Some).ok_or_else(|| {
            AppError::InvalidInput("client_type must be INTERNAL or EXTERNAL".into())
        }),
    }
}

fn parse_status(value: &str) -> AppResult<ClientStatus> {
    match value {
        "ACTIVE" => Ok(ClientStatus::Active),
        "INACTIVE" => Ok(ClientStatus::Inactive),
        _ => Err(AppError::InvalidInput(
            "status must be ACTIVE or INACTIVE".into(),
        )),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_clients(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let clients = app_state.api_client_use_cases.list_clients().await?;

    Ok(Json(
        clients.into_iter().map(client_response).collect::<Vec<_>>(),
    ))
}

async fn list_active_clients(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let clients = app_state.api_client_use_cases.list_active_clients().await?;

    Ok(Json(
        clients.into_iter().map(client_response).collect::<Vec<_>>(),
    ))
}

async fn list_clients_by_type(
    State(app_state): State<AppState>,
    Path(client_type): Path<String>,
) -> AppResult<impl IntoResponse> {
    let Some(client_type) = ClientType::from_str(&client_type) else {
        return Err(AppError::InvalidInput(
            "client_type must be INTERNAL or EXTERNAL".into(),
        ));
    };

    let clients = app_state
        .api_client_use_cases
        .list_clients_by_type(client_type)
        .await?;

    Ok(Json(
        clients.into_iter().map(client_response).collect::<Vec<_>>(),
    ))
}

async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let client = app_state.api_client_use_cases.get_client(id).await?;

    Ok(Json(client_response(client)))
}

/// The generated key is part of the response; this is the only place a
/// caller ever learns it.
async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> AppResult<impl IntoResponse> {
    let client_type = parse_client_type(payload.client_type.as_deref())?;

    let client = app_state
        .api_client_use_cases
        .create_client(
            &payload.client_name,
            payload.description,
            payload.contact_email,
            client_type,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client_response(client))))
}

async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> AppResult<impl IntoResponse> {
    let update = ApiClientUpdate {
        client_name: payload.client_name,
        description: payload.description,
        status: parse_status(&payload.status)?,
        contact_email: payload.contact_email,
        client_type: parse_client_type(payload.client_type.as_deref())?,
    };

    let client = app_state.api_client_use_cases.update_client(id, update).await?;

    Ok(Json(client_response(client)))
}

async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.api_client_use_cases.delete_client(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn rotate_key(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let client = app_state.api_client_use_cases.rotate_key(id).await?;

    Ok(Json(client_response(client)))
}
