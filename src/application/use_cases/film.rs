use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::film::{Film, Rating};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait FilmRepo: Send + Sync {
    async fn create(&self, input: FilmInput) -> AppResult<Film>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Film>>;

    async fn list(&self) -> AppResult<Vec<Film>>;

    /// Field-for-field copy of the writable fields; `id` and `last_update`
    /// stay server-controlled.
    async fn update(&self, id: Uuid, input: FilmInput) -> AppResult<Option<Film>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Case-insensitive substring match on the title.
    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Film>>;

    async fn list_by_rating(&self, rating: Rating) -> AppResult<Vec<Film>>;

    async fn list_by_release_year(&self, year: i32) -> AppResult<Vec<Film>>;

    async fn list_by_rental_rate_range(
        &self,
        min_cents: i64,
        max_cents: i64,
    ) -> AppResult<Vec<Film>>;

    async fn list_longer_than(&self, min_length: i32) -> AppResult<Vec<Film>>;
}

/// The writable field set, shared by create and update.
#[derive(Debug, Clone)]
pub struct FilmInput {
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: i32,
    pub original_language_id: Option<i32>,
    pub rental_duration: i32,
    pub rental_rate_cents: i64,
    pub length: Option<i32>,
    pub replacement_cost_cents: i64,
    pub rating: Rating,
    pub special_features: Option<String>,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct FilmUseCases {
    repo: Arc<dyn FilmRepo>,
}

impl FilmUseCases {
    pub fn new(repo: Arc<dyn FilmRepo>) -> Self {
        Self { repo }
    }

    pub async fn list_films(&self) -> AppResult<Vec<Film>> {
        self.repo.list().await
    }

    pub async fn get_film(&self, id: Uuid) -> AppResult<Film> {
        self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create_film(&self, input: FilmInput) -> AppResult<Film> {
        validate_input(&input)?;
        self.repo.create(input).await
    }

    pub async fn update_film(&self, id: Uuid, input: FilmInput) -> AppResult<Film> {
        validate_input(&input)?;
        self.repo.update(id, input).await?.ok_or(AppError::NotFound)
    }

    pub async fn delete_film(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<Film>> {
        self.repo.search_by_title(title).await
    }

    pub async fn films_by_rating(&self, rating: Rating) -> AppResult<Vec<Film>> {
        self.repo.list_by_rating(rating).await
    }

    pub async fn films_by_release_year(&self, year: i32) -> AppResult<Vec<Film>> {
        self.repo.list_by_release_year(year).await
    }

    pub async fn films_by_rental_rate_range(
        &self,
        min_cents: i64,
        max_cents: i64,
    ) -> AppResult<Vec<Film>> {
        if min_cents > max_cents {
            return Err(AppError::InvalidInput(
                "min_cents must not exceed max_cents".into(),
            ));
        }
        self.repo.list_by_rental_rate_range(min_cents, max_cents).await
    }

    pub async fn long_films(&self, min_length: i32) -> AppResult<Vec<Film>> {
        self.repo.list_longer_than(min_length).await
    }
}

fn validate_input(input: &FilmInput) -> AppResult<()> {
    if input.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".into()));
    }
    Ok(())
}
