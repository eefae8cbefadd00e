//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EntityId, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// No user matched the lookup.
        NotFound => "user not found",
        /// A unique constraint (the subject id) rejected the write.
        Duplicate { message: String } => "user already exists: {message}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for [`User`] records.
///
/// Implementations hold nothing beyond their storage handle. Subject-id
/// uniqueness is checked by the service; adapters may also enforce it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &EntityId) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identity provider subject.
    async fn find_by_sub_id(&self, sub_id: &str) -> Result<User, UserPersistenceError>;

    /// Insert a new user and return the identifier the store assigned.
    async fn create(&self, user: &User) -> Result<EntityId, UserPersistenceError>;

    /// Replace the stored fields of `user`, matched on `user.id`.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove a user.
    async fn delete(&self, id: &EntityId) -> Result<(), UserPersistenceError>;
}

/// Fixture repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &EntityId) -> Result<User, UserPersistenceError> {
        Err(UserPersistenceError::not_found())
    }

    async fn find_by_sub_id(&self, _sub_id: &str) -> Result<User, UserPersistenceError> {
        Err(UserPersistenceError::not_found())
    }

    async fn create(&self, _user: &User) -> Result<EntityId, UserPersistenceError> {
        Ok(bson::oid::ObjectId::new().into())
    }

    async fn update(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Err(UserPersistenceError::not_found())
    }

    async fn delete(&self, _id: &EntityId) -> Result<(), UserPersistenceError> {
        Ok(())
    }
}
