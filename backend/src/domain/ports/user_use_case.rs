//! Driving port for user registration and profile maintenance.

use async_trait::async_trait;

use crate::domain::{EntityId, Error, User, UserPatch};

/// Use cases inbound adapters invoke for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// Register a new user, returning it with its assigned id.
    async fn register(&self, user: User) -> Result<User, Error>;

    /// Look a user up by id.
    async fn find_by_id(&self, id: &EntityId) -> Result<User, Error>;

    /// Look a user up by identity provider subject.
    async fn find_by_sub_id(&self, sub_id: &str) -> Result<User, Error>;

    /// Merge `patch` into the stored user and return the result.
    async fn update(&self, id: &EntityId, patch: UserPatch) -> Result<User, Error>;

    /// Remove a user.
    async fn delete(&self, id: &EntityId) -> Result<(), Error>;
}
