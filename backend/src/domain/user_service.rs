//! User registration and profile maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{UserPersistenceError, UserRepository, UserUseCase};
use crate::domain::{EntityId, Error, SignUpPhase, User, UserPatch};

/// User service implementing [`UserUseCase`] over a [`UserRepository`].
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a service backed by `repo`, reading "now" from `clock`.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use profile_backend::domain::UserService;
    /// # use profile_backend::domain::ports::FixtureUserRepository;
    /// # use mockable::DefaultClock;
    /// let service = UserService::new(Arc::new(FixtureUserRepository), Arc::new(DefaultClock));
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::NotFound => Error::not_found("user not found"),
        UserPersistenceError::Duplicate { message } => {
            debug!(%message, "duplicate user rejected by repository");
            Error::conflict("user already exists")
        }
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> UserUseCase for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, mut user: User) -> Result<User, Error> {
        match self.repo.find_by_sub_id(&user.sub_id).await {
            Ok(_) => return Err(Error::conflict("user already exists")),
            Err(UserPersistenceError::NotFound) => {}
            Err(err) => return Err(map_user_persistence_error(err)),
        }

        user.sign_up_phase = SignUpPhase::Preferences;
        user.validate(self.clock.utc())?;

        user.id = self
            .repo
            .create(&user)
            .await
            .map_err(map_user_persistence_error)?;
        debug!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn find_by_sub_id(&self, sub_id: &str) -> Result<User, Error> {
        self.repo
            .find_by_sub_id(sub_id)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn update(&self, id: &EntityId, patch: UserPatch) -> Result<User, Error> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?;

        patch.apply(&mut user);
        user.validate(self.clock.utc())?;

        self.repo
            .update(&user)
            .await
            .map_err(map_user_persistence_error)?;
        debug!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        self.repo
            .delete(id)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
