use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::actor::Actor;

#[async_trait]
pub trait ActorRepo: Send + Sync {
    async fn create(&self, input: ActorInput) -> AppResult<Actor>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Actor>>;

    async fn list(&self) -> AppResult<Vec<Actor>>;

    async fn update(&self, id: Uuid, input: ActorInput) -> AppResult<Option<Actor>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Debug, Clone)]
pub struct ActorInput {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone)]
pub struct ActorUseCases {
    repo: Arc<dyn ActorRepo>,
}

impl ActorUseCases {
    pub fn new(repo: Arc<dyn ActorRepo>) -> Self {
        Self { repo }
    }

    pub async fn list_actors(&self) -> AppResult<Vec<Actor>> {
        self.repo.list().await
    }

    pub async fn get_actor(&self, id: Uuid) -> AppResult<Actor> {
        self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create_actor(&self, input: ActorInput) -> AppResult<Actor> {
        validate_input(&input)?;
        self.repo.create(input).await
    }

    pub async fn update_actor(&self, id: Uuid, input: ActorInput) -> AppResult<Actor> {
        validate_input(&input)?;
        self.repo.update(id, input).await?.ok_or(AppError::NotFound)
    }

    pub async fn delete_actor(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn validate_input(input: &ActorInput) -> AppResult<()> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "first_name and last_name must not be empty".into(),
        ));
    }
    Ok(())
}
