use std::sync::Arc;

use crate::{
    application::use_cases::{
        actor::ActorUseCases, api_client::ApiClientUseCases, audit_log::AuditLogUseCases,
        film::FilmUseCases,
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api_client_use_cases: Arc<ApiClientUseCases>,
    pub film_use_cases: Arc<FilmUseCases>,
    pub actor_use_cases: Arc<ActorUseCases>,
    pub audit_log_use_cases: Arc<AuditLogUseCases>,
}
