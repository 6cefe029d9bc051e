use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::app_error::AppResult;
use crate::domain::entities::audit_entry::AuditEntry;

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait AuditLogRepo: Send + Sync {
    /// Append one entry. Entries are immutable once written; there is no
    /// update or delete path.
    async fn insert(&self, entry: NewAuditEntry) -> AppResult<AuditEntry>;

    /// Substring match over `uri` and `request_summary`.
    async fn search(&self, keyword: &str) -> AppResult<Vec<AuditEntry>>;

    /// Inclusive timestamp range.
    async fn find_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<AuditEntry>>;

    /// Entries with `execution_time_ms` strictly above the threshold.
    async fn find_slower_than(&self, threshold_ms: i64) -> AppResult<Vec<AuditEntry>>;

    async fn find_by_method(&self, method: &str) -> AppResult<Vec<AuditEntry>>;

    async fn find_by_status(&self, status: i32) -> AppResult<Vec<AuditEntry>>;
}

#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub timestamp: NaiveDateTime,
    pub method: String,
    pub uri: String,
    pub request_summary: String,
    pub response_status: i32,
    pub execution_time_ms: i64,
    pub client_ip: String,
    pub user_agent: Option<String>,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct AuditLogUseCases {
    repo: Arc<dyn AuditLogRepo>,
}

impl AuditLogUseCases {
    pub fn new(repo: Arc<dyn AuditLogRepo>) -> Self {
        Self { repo }
    }

    /// Persist one entry for a completed request. The access-log middleware
    /// treats a failure here as operational, never as a request failure.
    pub async fn record(&self, entry: NewAuditEntry) -> AppResult<AuditEntry> {
        self.repo.insert(entry).await
    }

    pub async fn search(&self, keyword: &str) -> AppResult<Vec<AuditEntry>> {
        self.repo.search(keyword).await
    }

    pub async fn find_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<AuditEntry>> {
        self.repo.find_by_date_range(start, end).await
    }

    pub async fn find_slow_requests(&self, threshold_ms: i64) -> AppResult<Vec<AuditEntry>> {
        self.repo.find_slower_than(threshold_ms).await
    }

    pub async fn find_by_method(&self, method: &str) -> AppResult<Vec<AuditEntry>> {
        self.repo.find_by_method(method).await
    }

    pub async fn find_by_status(&self, status: i32) -> AppResult<Vec<AuditEntry>> {
        self.repo.find_by_status(status).await
    }
}
