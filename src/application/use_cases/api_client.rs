use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::api_client::{ApiClient, ClientStatus, ClientType};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait ApiClientRepo: Send + Sync {
    async fn create(&self, new: NewApiClient) -> AppResult<ApiClient>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<ApiClient>>;

    async fn get_by_key(&self, api_key: &str) -> AppResult<Option<ApiClient>>;

    async fn list(&self) -> AppResult<Vec<ApiClient>>;

    async fn list_by_status(&self, status: ClientStatus) -> AppResult<Vec<ApiClient>>;

    async fn list_by_type(&self, client_type: ClientType) -> AppResult<Vec<ApiClient>>;

    /// Copies the mutable profile fields. Never touches the key or the
    /// usage counters.
    async fn update(&self, id: Uuid, update: ApiClientUpdate) -> AppResult<Option<ApiClient>>;

    /// Swaps the stored key in a single write. The old key stops validating
    /// the moment this persists.
    async fn replace_key(&self, id: Uuid, api_key: &str) -> AppResult<Option<ApiClient>>;

    /// Sets `last_used_at` and increments `request_count` atomically at the
    /// storage layer.
    async fn touch_usage(&self, id: Uuid) -> AppResult<ApiClient>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Debug, Clone)]
pub struct NewApiClient {
    pub client_name: String,
    pub api_key: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub client_type: Option<ClientType>,
}

#[derive(Debug, Clone)]
pub struct ApiClientUpdate {
    pub client_name: String,
    pub description: Option<String>,
    pub status: ClientStatus,
    pub contact_email: Option<String>,
    pub client_type: Option<ClientType>,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct ApiClientUseCases {
    repo: Arc<dyn ApiClientRepo>,
}

impl ApiClientUseCases {
    pub fn new(repo: Arc<dyn ApiClientRepo>) -> Self {
        Self { repo }
    }

    // ========================================================================
    // Validation (request path)
    // ========================================================================

    /// Validate a presented API key.
    ///
    /// Returns `None` for an empty, unknown, or inactive key; inactive
    /// clients are indistinguishable from unknown keys to the caller. On
    /// success the client's usage fields are updated before returning, and
    /// the returned profile reflects the update.
    pub async fn validate_key(&self, presented: &str) -> AppResult<Option<ApiClient>> {
        if presented.is_empty() {
            return Ok(None);
        }

        let Some(client) = self.repo.get_by_key(presented).await? else {
            return Ok(None);
        };

        if client.status != ClientStatus::Active {
            tracing::warn!(client = %client.client_name, "inactive client attempted access");
            return Ok(None);
        }

        let updated = self.repo.touch_usage(client.id).await?;
        Ok(Some(updated))
    }

    // ========================================================================
    // Management (admin surface)
    // ========================================================================

    pub async fn list_clients(&self) -> AppResult<Vec<ApiClient>> {
        self.repo.list().await
    }

    pub async fn list_active_clients(&self) -> AppResult<Vec<ApiClient>> {
        self.repo.list_by_status(ClientStatus::Active).await
    }

    pub async fn list_clients_by_type(&self, client_type: ClientType) -> AppResult<Vec<ApiClient>> {
        self.repo.list_by_type(client_type).await
    }

    pub async fn get_client(&self, id: Uuid) -> AppResult<ApiClient> {
        self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Register a new client. The key is generated server-side and returned
    /// as part of the created record; callers can never supply one.
    pub async fn create_client(
        &self,
        client_name: &str,
        description: Option<String>,
        contact_email: Option<String>,
        client_type: Option<ClientType>,
    ) -> AppResult<ApiClient> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(AppError::InvalidInput("client_name must not be empty".into()));
        }

        let api_key = self.issue_unique_key().await?;

        self.repo
            .create(NewApiClient {
                client_name: client_name.to_string(),
                api_key,
                description,
                contact_email,
                client_type,
            })
            .await
    }

    pub async fn update_client(&self, id: Uuid, update: ApiClientUpdate) -> AppResult<ApiClient> {
        self.repo.update(id, update).await?.ok_or(AppError::NotFound)
    }

    pub async fn delete_client(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Replace the client's key with a freshly issued one. The old key is
    /// invalid from the moment the swap persists; there is no grace period.
    pub async fn rotate_key(&self, id: Uuid) -> AppResult<ApiClient> {
        let api_key = self.issue_unique_key().await?;

        let client = self
            .repo
            .replace_key(id, &api_key)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(client = %client.client_name, "api key rotated");
        Ok(client)
    }

    /// Draw keys until one does not collide with a stored key. The unique
    /// index on `api_key` remains the backstop for concurrent issuance.
    async fn issue_unique_key(&self) -> AppResult<String> {
        loop {
            let key = generate_api_key();
            if self.repo.get_by_key(&key).await?.is_none() {
                return Ok(key);
            }
        }
    }
}

// ============================================================================
// Key Generation
// ============================================================================

const API_KEY_LENGTH: usize = 32;

/// Generate a random alphanumeric API key from the OS entropy source.
fn generate_api_key() -> String {
    rand::rngs::OsRng
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LENGTH)
        .map(char::from)
        .collect()
}
