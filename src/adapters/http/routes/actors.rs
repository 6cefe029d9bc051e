use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::use_cases::actor::ActorInput,
    domain::entities::actor::Actor,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_actors).post(create_actor))
        .route("/{id}", get(get_actor).put(update_actor).delete(delete_actor))
}

#[derive(Serialize)]
struct ActorResponse {
    id: Uuid,
    first_name: String,
    last_name: String,
    last_update: chrono::NaiveDateTime,
}

fn actor_response(actor: Actor) -> ActorResponse {
    ActorResponse {
        id: actor.id,
        first_name: actor.first_name,
        last_name: actor.last_name,
        last_update: actor.last_update,
    }
}

#[derive(Deserialize)]
struct ActorPayload {
    first_name: String,
    last_name: String,
}

async fn list_actors(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let actors = app_state.actor_use_cases.list_actors().await?;

    Ok(Json(actors.into_iter().map(actor_response).collect::<Vec<_>>()))
}

async fn get_actor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let actor = app_state.actor_use_cases.get_actor(id).await?;

    Ok(Json(actor_response(actor)))
}

async fn create_actor(
    State(app_state): State<AppState>,
    Json(payload): Json<ActorPayload>,
) -> AppResult<impl IntoResponse> {
    let actor = app_state
        .actor_use_cases
        .create_actor(ActorInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(actor_response(actor))))
}

async fn update_actor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActorPayload>,
) -> AppResult<impl IntoResponse> {
    let actor = app_state
        .actor_use_cases
        .update_actor(
            id,
            ActorInput {
                first_name: payload.first_name,
                last_name: payload.last_name,
            },
        )
        .await?;

    Ok(Json(actor_response(actor)))
}

async fn delete_actor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.actor_use_cases.delete_actor(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
