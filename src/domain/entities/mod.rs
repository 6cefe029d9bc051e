pub mod actor;
pub mod api_client;
pub mod audit_entry;
pub mod film;
