//! In-memory mock implementations for the repository traits.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        actor::{ActorInput, ActorRepo},
        api_client::{ApiClientRepo, ApiClientUpdate, NewApiClient},
        audit_log::{AuditLogRepo, NewAuditEntry},
        film::{FilmInput, FilmRepo},
    },
    domain::entities::{
        actor::Actor,
        api_client::{ApiClient, ClientStatus, ClientType},
        audit_entry::AuditEntry,
        film::{Film, Rating},
    },
};

// ============================================================================
// ApiClient
// ============================================================================

/// In-memory implementation of ApiClientRepo for testing.
#[derive(Default)]
pub struct InMemoryApiClientRepo {
    pub clients: Mutex<HashMap<Uuid, ApiClient>>,
    /// Number of `get_by_key` calls, for asserting lookup short-circuits.
    pub key_lookups: AtomicUsize,
}

impl InMemoryApiClientRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial clients for testing.
    pub fn with_clients(clients: Vec<ApiClient>) -> Self {
        let map: HashMap<Uuid, ApiClient> = clients.into_iter().map(|c| (c.id, c)).collect();
        Self {
            clients: Mutex::new(map),
            key_lookups: AtomicUsize::new(0),
        }
    }

    /// Get all clients (for test assertions).
    pub fn get_all(&self) -> Vec<ApiClient> {
        self.clients.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl ApiClientRepo for InMemoryApiClientRepo {
    async fn create(&self, new: NewApiClient) -> AppResult<ApiClient> {
        let mut clients = self.clients.lock().unwrap();

        if clients.values().any(|c| c.client_name == new.client_name) {
            return Err(AppError::InvalidInput("client_name already exists".into()));
        }
        if clients.values().any(|c| c.api_key == new.api_key) {
            return Err(AppError::InvalidInput("api_key already exists".into()));
        }

        let client = ApiClient {
            id: Uuid::new_v4(),
            client_name: new.client_name,
            api_key: new.api_key,
            description: new.description,
            status: ClientStatus::Active,
            created_at: chrono::Utc::now().naive_utc(),
            last_used_at: None,
            request_count: 0,
            contact_email: new.contact_email,
            client_type: new.client_type,
        };

        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<ApiClient>> {
        Ok(self.clients.lock().unwrap().get(&id).cloned())
    }

    async fn get_by_key(&self, api_key: &str) -> AppResult<Option<ApiClient>> {
        self.key_lookups.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .clients
            .lock()
            .unwrap()
            .values()
            .find(|c| c.api_key == api_key)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<ApiClient>> {
        Ok(self.get_all())
    }

    async fn list_by_status(&self, status: ClientStatus) -> AppResult<Vec<ApiClient>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn list_by_type(&self, client_type: ClientType) -> AppResult<Vec<ApiClient>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.client_type == Some(client_type))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, update: ApiClientUpdate) -> AppResult<Option<ApiClient>> {
        let mut clients = self.clients.lock().unwrap();
        let Some(client) = clients.get_mut(&id) else {
            return Ok(None);
        };

        client.client_name = update.client_name;
        client.description = update.description;
        client.status = update.status;
        client.contact_email = update.contact_email;
        client.client_type = update.client_type;

        Ok(Some(client.clone()))
    }

    async fn replace_key(&self, id: Uuid, api_key: &str) -> AppResult<Option<ApiClient>> {
        let mut clients = self.clients.lock().unwrap();
        let Some(client) = clients.get_mut(&id) else {
            return Ok(None);
        };

        client.api_key = api_key.to_string();

        Ok(Some(client.clone()))
    }

    async fn touch_usage(&self, id: Uuid) -> AppResult<ApiClient> {
        let mut clients = self.clients.lock().unwrap();
        let client = clients.get_mut(&id).ok_or(AppError::NotFound)?;

        client.last_used_at = Some(chrono::Utc::now().naive_utc());
        client.request_count += 1;

        Ok(client.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.clients.lock().unwrap().remove(&id).is_some())
    }
}

// ============================================================================
// Film
// ============================================================================

/// In-memory implementation of FilmRepo for testing.
#[derive(Default)]
pub struct InMemoryFilmRepo {
    pub films: Mutex<HashMap<Uuid, Film>>,
}

impl InMemoryFilmRepo {
    pub fn with_films(films: Vec<Film>) -> Self {
        let map: HashMap<Uuid, Film> = films.into_iter().map(|f| (f.id, f)).collect();
        Self {
            films: Mutex::new(map),
        }
    }

    fn sorted_by_title(films: Vec<Film>) -> Vec<Film> {
        let mut films = films;
        films.sort_by(|a, b| a.title.cmp(&b.title));
        films
    }
}

fn apply_film_input(film: &mut Film, input: FilmInput) {
    film.title = input.title;
    film.description = input.description;
    film.release_year = input.release_year;
    film.language_id = input.language_id;
    film.original_language_id = input.original_language_id;
    film.rental_duration = input.rental_duration;
    film.rental_rate_cents = input.rental_rate_cents;
    film.length = input.length;
    film.replacement_cost_cents = input.replacement_cost_cents;
    film.rating = input.rating;
    film.special_features = input.special_features;
    film.last_update = chrono::Utc::now().naive_utc();
}

#[async_trait]
impl FilmRepo for InMemoryFilmRepo {
    async fn create(&self, input: FilmInput) -> AppResult<Film> {
        let mut film = Film {
            id: Uuid::new_v4(),
            title: String::new(),
            description: None,
            release_year: None,
            language_id: 0,
            original_language_id: None,
            rental_duration: 0,
            rental_rate_cents: 0,
            length: None,
            replacement_cost_cents: 0,
            rating: Rating::G,
            special_features: None,
            last_update: chrono::Utc::now().naive_utc(),
        };
        apply_film_input(&mut film, input);

        self.films.lock().unwrap().insert(film.id, film.clone());
        Ok(film)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Film>> {
        Ok(self.films.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Film>> {
        Ok(Self::sorted_by_title(
            self.films.lock().unwrap().values().cloned().collect(),
        ))
    }

    async fn update(&self, id: Uuid, input: FilmInput) -> AppResult<Option<Film>> {
        let mut films = self.films.lock().unwrap();
        let Some(film) = films.get_mut(&id) else {
            return Ok(None);
        };

        apply_film_input(film, input);
        Ok(Some(film.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.films.lock().unwrap().remove(&id).is_some())
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<Film>> {
        let needle = title.to_lowercase();
        Ok(Self::sorted_by_title(
            self.films
                .lock()
                .unwrap()
                .values()
                .filter(|f| f.title.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_rating(&self, rating: Rating) -> AppResult<Vec<Film>> {
        Ok(Self::sorted_by_title(
            self.films
                .lock()
                .unwrap()
                .values()
                .filter(|f| f.rating == rating)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_release_year(&self, year: i32) -> AppResult<Vec<Film>> {
        Ok(Self::sorted_by_title(
            self.films
                .lock()
                .unwrap()
                .values()
                .filter(|f| f.release_year == Some(year))
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_rental_rate_range(
        &self,
        min_cents: i64,
        max_cents: i64,
    ) -> AppResult<Vec<Film>> {
        Ok(Self::sorted_by_title(
            self.films
                .lock()
                .unwrap()
                .values()
                .filter(|f| f.rental_rate_cents >= min_cents && f.rental_rate_cents <= max_cents)
                .cloned()
                .collect(),
        ))
    }

    async fn list_longer_than(&self, min_length: i32) -> AppResult<Vec<Film>> {
        Ok(Self::sorted_by_title(
            self.films
                .lock()
                .unwrap()
                .values()
                .filter(|f| f.length.is_some_and(|len| len >= min_length))
                .cloned()
                .collect(),
        ))
    }
}

// ============================================================================
// Actor
// ============================================================================

/// In-memory implementation of ActorRepo for testing.
#[derive(Default)]
pub struct InMemoryActorRepo {
    pub actors: Mutex<HashMap<Uuid, Actor>>,
}

impl InMemoryActorRepo {
    pub fn with_actors(actors: Vec<Actor>) -> Self {
        let map: HashMap<Uuid, Actor> = actors.into_iter().map(|a| (a.id, a)).collect();
        Self {
            actors: Mutex::new(map),
        }
    }
}

#[async_trait]
impl ActorRepo for InMemoryActorRepo {
    async fn create(&self, input: ActorInput) -> AppResult<Actor> {
        let actor = Actor {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            last_update: chrono::Utc::now().naive_utc(),
        };

        self.actors.lock().unwrap().insert(actor.id, actor.clone());
        Ok(actor)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Actor>> {
        Ok(self.actors.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Actor>> {
        let mut actors: Vec<Actor> = self.actors.lock().unwrap().values().cloned().collect();
        actors.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(actors)
    }

    async fn update(&self, id: Uuid, input: ActorInput) -> AppResult<Option<Actor>> {
        let mut actors = self.actors.lock().unwrap();
        let Some(actor) = actors.get_mut(&id) else {
            return Ok(None);
        };

        actor.first_name = input.first_name;
        actor.last_name = input.last_name;
        actor.last_update = chrono::Utc::now().naive_utc();

        Ok(Some(actor.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.actors.lock().unwrap().remove(&id).is_some())
    }
}

// ============================================================================
// Audit log
// ============================================================================

/// In-memory implementation of AuditLogRepo for testing. Append-only, like
/// the real store.
#[derive(Default)]
pub struct InMemoryAuditLogRepo {
    pub entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditLogRepo {
    pub fn with_entries(entries: Vec<AuditEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Get all entries in insertion order (for test assertions).
    pub fn get_all(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn filtered(&self, predicate: impl Fn(&AuditEntry) -> bool) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditLogRepo for InMemoryAuditLogRepo {
    async fn insert(&self, entry: NewAuditEntry) -> AppResult<AuditEntry> {
        let entry = AuditEntry {
            id: Uuid::new_v4(),
            timestamp: entry.timestamp,
            method: entry.method,
            uri: entry.uri,
            request_summary: entry.request_summary,
            response_status: entry.response_status,
            execution_time_ms: entry.execution_time_ms,
            client_ip: entry.client_ip,
            user_agent: entry.user_agent,
        };

        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<AuditEntry>> {
        Ok(self.filtered(|e| e.uri.contains(keyword) || e.request_summary.contains(keyword)))
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<AuditEntry>> {
        Ok(self.filtered(|e| e.timestamp >= start && e.timestamp <= end))
    }

    async fn find_slower_than(&self, threshold_ms: i64) -> AppResult<Vec<AuditEntry>> {
        Ok(self.filtered(|e| e.execution_time_ms > threshold_ms))
    }

    async fn find_by_method(&self, method: &str) -> AppResult<Vec<AuditEntry>> {
        Ok(self.filtered(|e| e.method == method))
    }

    async fn find_by_status(&self, status: i32) -> AppResult<Vec<AuditEntry>> {
        Ok(self.filtered(|e| e.response_status == status))
    }
}
