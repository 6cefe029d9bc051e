use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::actor::{ActorInput, ActorRepo},
    domain::entities::actor::Actor,
};

fn row_to_actor(row: sqlx::postgres::PgRow) -> Actor {
    Actor {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        last_update: row.get("last_update"),
    }
}

#[async_trait]
impl ActorRepo for PostgresPersistence {
    async fn create(&self, input: ActorInput) -> AppResult<Actor> {
        let row = sqlx::query(
            r#"
            INSERT INTO actors (id, first_name, last_name, last_update)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
            RETURNING id, first_name, last_name, last_update
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row_to_actor(row))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Actor>> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, last_update FROM actors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_actor))
    }

    async fn list(&self) -> AppResult<Vec<Actor>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, last_update FROM actors ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_actor).collect())
    }

    async fn update(&self, id: Uuid, input: ActorInput) -> AppResult<Option<Actor>> {
        let row = sqlx::query(
            r#"
            UPDATE actors
            SET first_name = $2, last_name = $3, last_update = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, first_name, last_name, last_update
            "#,
        )
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_actor))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
