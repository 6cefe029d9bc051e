use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::api_client::{ApiClientRepo, ApiClientUpdate, NewApiClient},
    domain::entities::api_client::{ApiClient, ClientStatus, ClientType},
};

const CLIENT_COLUMNS: &str = "id, client_name, api_key, description, status, created_at, \
     last_used_at, request_count, contact_email, client_type";

fn row_to_client(row: sqlx::postgres::PgRow) -> ApiClient {
    ApiClient {
        id: row.get("id"),
        client_name: row.get("client_name"),
        api_key: row.get("api_key"),
        description: row.get("description"),
        status: ClientStatus::from_str(row.get::<String, _>("status").as_str()),
        created_at: row.get("created_at"),
        last_used_at: row.get("last_used_at"),
        request_count: row.get("request_count"),
        contact_email: row.get("contact_email"),
        client_type: row
            .get::<Option<String>, _>("client_type")
            .as_deref()
            .and_then(ClientType::from_str),
    }
}

#[async_trait]
impl ApiClientRepo for PostgresPersistence {
    async fn create(&self, new: NewApiClient) -> AppResult<ApiClient> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO api_clients (id, client_name, api_key, description, status,
                                     created_at, request_count, contact_email, client_type)
            VALUES ($1, $2, $3, $4, 'ACTIVE', CURRENT_TIMESTAMP, 0, $5, $6)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.client_name)
        .bind(&new.api_key)
        .bind(&new.description)
        .bind(&new.contact_email)
        .bind(new.client_type.map(|t| t.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row_to_client(row))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<ApiClient>> {
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM api_clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_client))
    }

    async fn get_by_key(&self, api_key: &str) -> AppResult<Option<ApiClient>> {
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM api_clients WHERE api_key = $1"
        ))
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_client))
    }

    async fn list(&self) -> AppResult<Vec<ApiClient>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM api_clients ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_client).collect())
    }

    async fn list_by_status(&self, status: ClientStatus) -> AppResult<Vec<ApiClient>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM api_clients WHERE status = $1 ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_client).collect())
    }

    async fn list_by_type(&self, client_type: ClientType) -> AppResult<Vec<ApiClient>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM api_clients WHERE client_type = $1 ORDER BY created_at DESC"
        ))
        .bind(client_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_client).collect())
    }

    async fn update(&self, id: Uuid, update: ApiClientUpdate) -> AppResult<Option<ApiClient>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE api_clients
            SET client_name = $2, description = $3, status = $4,
                contact_email = $5, client_type = $6
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.client_name)
        .bind(&update.description)
        .bind(update.status.as_str())
        .bind(&update.contact_email)
        .bind(update.client_type.map(|t| t.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_client))
    }

    async fn replace_key(&self, id: Uuid, api_key: &str) -> AppResult<Option<ApiClient>> {
        let row = sqlx::query(&format!(
            "UPDATE api_clients SET api_key = $2 WHERE id = $1 RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_client))
    }

    async fn touch_usage(&self, id: Uuid) -> AppResult<ApiClient> {
        // Single statement so concurrent validations cannot lose increments.
        let row = sqlx::query(&format!(
            r#"
            UPDATE api_clients
            SET last_used_at = CURRENT_TIMESTAMP, request_count = request_count + 1
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        row.map(row_to_client).ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM api_clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
