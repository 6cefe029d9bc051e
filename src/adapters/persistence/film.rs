use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::film::{FilmInput, FilmRepo},
    domain::entities::film::{Film, Rating},
};

const FILM_COLUMNS: &str = "id, title, description, release_year, language_id, \
     original_language_id, rental_duration, rental_rate_cents, length, \
     replacement_cost_cents, rating, special_features, last_update";

fn row_to_film(row: sqlx::postgres::PgRow) -> Film {
    Film {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        release_year: row.get("release_year"),
        language_id: row.get("language_id"),
        original_language_id: row.get("original_language_id"),
        rental_duration: row.get("rental_duration"),
        rental_rate_cents: row.get("rental_rate_cents"),
        length: row.get("length"),
        replacement_cost_cents: row.get("replacement_cost_cents"),
        rating: Rating::from_str(row.get::<String, _>("rating").as_str()).unwrap_or(Rating::G),
        special_features: row.get("special_features"),
        last_update: row.get("last_update"),
    }
}

#[async_trait]
impl FilmRepo for PostgresPersistence {
    async fn create(&self, input: FilmInput) -> AppResult<Film> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO films (id, title, description, release_year, language_id,
                               original_language_id, rental_duration, rental_rate_cents,
                               length, replacement_cost_cents, rating, special_features,
                               last_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, CURRENT_TIMESTAMP)
            RETURNING {FILM_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.release_year)
        .bind(input.language_id)
        .bind(input.original_language_id)
        .bind(input.rental_duration)
        .bind(input.rental_rate_cents)
        .bind(input.length)
        .bind(input.replacement_cost_cents)
        .bind(input.rating.as_str())
        .bind(&input.special_features)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row_to_film(row))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Film>> {
        let row = sqlx::query(&format!("SELECT {FILM_COLUMNS} FROM films WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(row_to_film))
    }

    async fn list(&self) -> AppResult<Vec<Film>> {
        let rows = sqlx::query(&format!("SELECT {FILM_COLUMNS} FROM films ORDER BY title"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_film).collect())
    }

    async fn update(&self, id: Uuid, input: FilmInput) -> AppResult<Option<Film>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE films
            SET title = $2, description = $3, release_year = $4, language_id = $5,
                original_language_id = $6, rental_duration = $7, rental_rate_cents = $8,
                length = $9, replacement_cost_cents = $10, rating = $11,
                special_features = $12, last_update = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {FILM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.release_year)
        .bind(input.language_id)
        .bind(input.original_language_id)
        .bind(input.rental_duration)
        .bind(input.rental_rate_cents)
        .bind(input.length)
        .bind(input.replacement_cost_cents)
        .bind(input.rating.as_str())
        .bind(&input.special_features)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_film))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Film>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE title ILIKE '%' || $1 || '%' ORDER BY title"
        ))
        .bind(title)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_film).collect())
    }

    async fn list_by_rating(&self, rating: Rating) -> AppResult<Vec<Film>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE rating = $1 ORDER BY title"
        ))
        .bind(rating.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_film).collect())
    }

    async fn list_by_release_year(&self, year: i32) -> AppResult<Vec<Film>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE release_year = $1 ORDER BY title"
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_film).collect())
    }

    async fn list_by_rental_rate_range(
        &self,
        min_cents: i64,
        max_cents: i64,
    ) -> AppResult<Vec<Film>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE rental_rate_cents BETWEEN $1 AND $2 ORDER BY rental_rate_cents"
        ))
        .bind(min_cents)
        .bind(max_cents)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_film).collect())
    }

    async fn list_longer_than(&self, min_length: i32) -> AppResult<Vec<Film>> {
        let rows = sqlx::query(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE length >= $1 ORDER BY length DESC"
        ))
        .bind(min_length)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_film).collect())
    }
}
