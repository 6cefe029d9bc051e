//! Test app state builder for HTTP-level integration testing.
//!
//! Provides `TestAppStateBuilder`, which creates a minimal `AppState`
//! backed by in-memory repositories.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        actor::{ActorRepo, ActorUseCases},
        api_client::{ApiClientRepo, ApiClientUseCases},
        audit_log::{AuditLogRepo, AuditLogUseCases},
        film::{FilmRepo, FilmUseCases},
    },
    domain::entities::{actor::Actor, api_client::ApiClient, audit_entry::AuditEntry, film::Film},
    infra::config::AppConfig,
    test_utils::{
        InMemoryActorRepo, InMemoryApiClientRepo, InMemoryAuditLogRepo, InMemoryFilmRepo,
    },
};

pub fn create_test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://localhost/unused-in-tests".to_string(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
    }
}

/// Handles to the in-memory repositories behind a built `AppState`, for
/// asserting on side effects (usage counters, audit entries).
pub struct TestRepos {
    pub api_clients: Arc<InMemoryApiClientRepo>,
    pub films: Arc<InMemoryFilmRepo>,
    pub actors: Arc<InMemoryActorRepo>,
    pub audit_log: Arc<InMemoryAuditLogRepo>,
}

/// Builder for creating `AppState` with in-memory repositories.
///
/// # Example
///
/// ```ignore
/// let app_state = TestAppStateBuilder::new()
///     .with_client(create_test_client(|c| c.client_name = "partner".to_string()))
///     .with_film(create_test_film(|_| {}))
///     .build();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    clients: Vec<ApiClient>,
    films: Vec<Film>,
    actors: Vec<Actor>,
    audit_entries: Vec<AuditEntry>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: ApiClient) -> Self {
        self.clients.push(client);
        self
    }

    pub fn with_film(mut self, film: Film) -> Self {
        self.films.push(film);
        self
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn with_audit_entry(mut self, entry: AuditEntry) -> Self {
        self.audit_entries.push(entry);
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_repos().0
    }

    pub fn build_with_repos(self) -> (AppState, TestRepos) {
        let api_clients = Arc::new(InMemoryApiClientRepo::with_clients(self.clients));
        let films = Arc::new(InMemoryFilmRepo::with_films(self.films));
        let actors = Arc::new(InMemoryActorRepo::with_actors(self.actors));
        let audit_log = Arc::new(InMemoryAuditLogRepo::with_entries(self.audit_entries));

        let app_state = AppState {
            config: Arc::new(create_test_config()),
            api_client_use_cases: Arc::new(ApiClientUseCases::new(
                api_clients.clone() as Arc<dyn ApiClientRepo>
            )),
            film_use_cases: Arc::new(FilmUseCases::new(films.clone() as Arc<dyn FilmRepo>)),
            actor_use_cases: Arc::new(ActorUseCases::new(actors.clone() as Arc<dyn ActorRepo>)),
            audit_log_use_cases: Arc::new(AuditLogUseCases::new(
                audit_log.clone() as Arc<dyn AuditLogRepo>
            )),
        };

        (
            app_state,
            TestRepos {
                api_clients,
                films,
                actors,
                audit_log,
            },
        )
    }
}
