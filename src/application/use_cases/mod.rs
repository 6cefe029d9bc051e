pub mod actor;
pub mod api_client;
pub mod audit_log;
pub mod film;
