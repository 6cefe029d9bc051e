use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::use_cases::film::FilmInput,
    domain::entities::film::{Film, Rating},
};

/// Film catalog endpoints. The auth layer is applied in `routes::router`
/// when nesting this router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_films).post(create_film))
        .route("/search", get(search_films))
        .route("/rating/{rating}", get(films_by_rating))
        .route("/year/{year}", get(films_by_year))
        .route("/rental-range", get(films_by_rental_range))
        .route("/long-films", get(long_films))
        .route("/{id}", get(get_film).put(update_film).delete(delete_film))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
struct FilmResponse {
    id: Uuid,
    title: String,
    description: Option<String>,
    release_year: Option<i32>,
    language_id: i32,
    original_language_id: Option<i32>,
    rental_duration: i32,
    rental_rate_cents: i64,
    length: Option<i32>,
    replacement_cost_cents: i64,
    rating: &'static str,
    special_features: Option<String>,
    last_update: chrono::NaiveDateTime,
}

fn film_response(film: Film) -> FilmResponse {
    FilmResponse {
        id: film.id,
        title: film.title,
        description: film.description,
        release_year: film.release_year,
        language_id: film.language_id,
        original_language_id: film.original_language_id,
        rental_duration: film.rental_duration,
        rental_rate_cents: film.rental_rate_cents,
        length: film.length,
        replacement_cost_cents: film.replacement_cost_cents,
        rating: film.rating.as_str(),
        special_features: film.special_features,
        last_update: film.last_update,
    }
}

#[derive(Deserialize)]
struct FilmPayload {
    title: String,
    description: Option<String>,
    release_year: Option<i32>,
    language_id: i32,
    original_language_id: Option<i32>,
    #[serde(default = "default_rental_duration")]
    rental_duration: i32,
    #[serde(default = "default_rental_rate_cents")]
    rental_rate_cents: i64,
    length: Option<i32>,
    #[serde(default = "default_replacement_cost_cents")]
    replacement_cost_cents: i64,
    #[serde(default = "default_rating")]
    rating: String,
    special_features: Option<String>,
}

fn default_rental_duration() -> i32 {
    3
}

fn default_rental_rate_cents() -> i64 {
    499
}

fn default_replacement_cost_cents() -> i64 {
    1999
}

fn default_rating() -> String {
    "G".to_string()
}

fn payload_to_input(payload: FilmPayload) -> AppResult<FilmInput> {
    let Some(rating) = Rating::from_str(&payload.rating) else {
        return Err(AppError::InvalidInput(
            "rating must be one of: G, PG, PG-13, R, NC-17".into(),
        ));
    };

    Ok(FilmInput {
        title: payload.title,
        description: payload.description,
        release_year: payload.release_year,
        language_id: payload.language_id,
        original_language_id: payload.original_language_id,
        rental_duration: payload.rental_duration,
        rental_rate_cents: payload.rental_rate_cents,
        length: payload.length,
        replacement_cost_cents: payload.replacement_cost_cents,
        rating,
        special_features: payload.special_features,
    })
}

#[derive(Deserialize)]
struct SearchQuery {
    title: String,
}

#[derive(Deserialize)]
struct RentalRangeQuery {
    min_cents: i64,
    max_cents: i64,
}

#[derive(Deserialize)]
struct LongFilmsQuery {
    min_length: i32,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_films(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let films = app_state.film_use_cases.list_films().await?;

    Ok(Json(films.into_iter().map(film_response).collect::<Vec<_>>()))
}

async fn get_film(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let film = app_state.film_use_cases.get_film(id).await?;

    Ok(Json(film_response(film)))
}

async fn create_film(
    State(app_state): State<AppState>,
    Json(payload): Json<FilmPayload>,
) -> AppResult<impl IntoResponse> {
    let input = payload_to_input(payload)?;

    let film = app_state.film_use_cases.create_film(input).await?;

    Ok((StatusCode::CREATED, Json(film_response(film))))
}

async fn update_film(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FilmPayload>,
) -> AppResult<impl IntoResponse> {
    let input = payload_to_input(payload)?;

    let film = app_state.film_use_cases.update_film(id, input).await?;

    Ok(Json(film_response(film)))
}

async fn delete_film(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    app_state.film_use_cases.delete_film(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn search_films(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let films = app_state.film_use_cases.search_by_title(&query.title).await?;

    Ok(Json(films.into_iter().map(film_response).collect::<Vec<_>>()))
}

async fn films_by_rating(
    State(app_state): State<AppState>,
    Path(rating): Path<String>,
) -> AppResult<impl IntoResponse> {
    let Some(rating) = Rating::from_str(&rating) else {
        return Err(AppError::InvalidInput(
            "rating must be one of: G, PG, PG-13, R, NC-17".into(),
        ));
    };

    let films = app_state.film_use_cases.films_by_rating(rating).await?;

    Ok(Json(films.into_iter().map(film_response).collect::<Vec<_>>()))
}

async fn films_by_year(
    State(app_state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let films = app_state.film_use_cases.films_by_release_year(year).await?;

    Ok(Json(films.into_iter().map(film_response).collect::<Vec<_>>()))
}

async fn films_by_rental_range(
    State(app_state): State<AppState>,
    Query(query): Query<RentalRangeQuery>,
) -> AppResult<impl IntoResponse> {
    let films = app_state
        .film_use_cases
        .films_by_rental_rate_range(query.min_cents, query.max_cents)
        .await?;

    Ok(Json(films.into_iter().map(film_response).collect::<Vec<_>>()))
}

async fn long_films(
    State(app_state): State<AppState>,
    Query(query): Query<LongFilmsQuery>,
) -> AppResult<impl IntoResponse> {
    let films = app_state.film_use_cases.long_films(query.min_length).await?;

    Ok(Json(films.into_iter().map(film_response).collect::<Vec<_>>()))
}
