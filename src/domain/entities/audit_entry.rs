use uuid::Uuid;

/// One access-log record per completed request. Append-only; never updated
/// or deleted once written. `request_summary` is redacted and must never
/// contain a full API key.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: chrono::NaiveDateTime,
    pub method: String,
    pub uri: String,
    pub request_summary: String,
    pub response_status: i32,
    pub execution_time_ms: i64,
    pub client_ip: String,
    pub user_agent: Option<String>,
}
