use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::audit_log::{AuditLogRepo, NewAuditEntry},
    domain::entities::audit_entry::AuditEntry,
};

const ENTRY_COLUMNS: &str = "id, timestamp, method, uri, request_summary, response_status, \
     execution_time_ms, client_ip, user_agent";

fn row_to_entry(row: sqlx::postgres::PgRow) -> AuditEntry {
    AuditEntry {
        id: row.get("id"),
        timestamp: row.get("timestamp"),
        method: row.get("method"),
        uri: row.get("uri"),
        request_summary: row.get("request_summary"),
        response_status: row.get("response_status"),
        execution_time_ms: row.get("execution_time_ms"),
        client_ip: row.get("client_ip"),
        user_agent: row.get("user_agent"),
    }
}

#[async_trait]
impl AuditLogRepo for PostgresPersistence {
    async fn insert(&self, entry: NewAuditEntry) -> AppResult<AuditEntry> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO api_audit_log (id, timestamp, method, uri, request_summary,
                                       response_status, execution_time_ms, client_ip, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(entry.timestamp)
        .bind(&entry.method)
        .bind(&entry.uri)
        .bind(&entry.request_summary)
        .bind(entry.response_status)
        .bind(entry.execution_time_ms)
        .bind(&entry.client_ip)
        .bind(&entry.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row_to_entry(row))
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM api_audit_log
            WHERE uri LIKE '%' || $1 || '%' OR request_summary LIKE '%' || $1 || '%'
            ORDER BY timestamp DESC
            "#
        ))
        .bind(keyword)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM api_audit_log
            WHERE timestamp BETWEEN $1 AND $2
            ORDER BY timestamp DESC
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn find_slower_than(&self, threshold_ms: i64) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM api_audit_log
            WHERE execution_time_ms > $1
            ORDER BY execution_time_ms DESC
            "#
        ))
        .bind(threshold_ms)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn find_by_method(&self, method: &str) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM api_audit_log
            WHERE method = $1
            ORDER BY timestamp DESC
            "#
        ))
        .bind(method)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn find_by_status(&self, status: i32) -> AppResult<Vec<AuditEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM api_audit_log
            WHERE response_status = $1
            ORDER BY timestamp DESC
            "#
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }
}
