//! Vehicle registration and removal, gated on the caller owning the vehicle.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    UserUseCase, VehiclePersistenceError, VehicleRepository, VehicleUseCase,
};
use crate::domain::{EntityId, Error, User, Vehicle};

/// Vehicle service implementing [`VehicleUseCase`].
///
/// Callers are resolved to their own [`User`] through the user use case; a
/// caller may only act on vehicles filed under that user's id.
#[derive(Clone)]
pub struct VehicleService<R> {
    repo: Arc<R>,
    users: Arc<dyn UserUseCase>,
    clock: Arc<dyn Clock>,
}

impl<R> VehicleService<R> {
    /// Create a service backed by `repo`, resolving callers through `users`.
    pub fn new(repo: Arc<R>, users: Arc<dyn UserUseCase>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, users, clock }
    }
}

fn map_vehicle_persistence_error(err: VehiclePersistenceError) -> Error {
    match err {
        VehiclePersistenceError::NotFound => Error::not_found("vehicle not found"),
        VehiclePersistenceError::Duplicate { message } => {
            Error::conflict(format!("vehicle already exists: {message}"))
        }
        VehiclePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("vehicle repository unavailable: {message}"))
        }
        VehiclePersistenceError::Query { message } => {
            error!(%message, "vehicle repository query failed");
            Error::internal(format!("vehicle repository error: {message}"))
        }
    }
}

fn wrong_user(caller: &User, claimed_owner: &EntityId) -> Error {
    warn!(
        caller_id = %caller.id,
        claimed_owner = %claimed_owner,
        "caller does not own the vehicle"
    );
    Error::forbidden("vehicle does not belong to the authenticated user")
}

#[async_trait]
impl<R> VehicleUseCase for VehicleService<R>
where
    R: VehicleRepository,
{
    async fn register(&self, mut vehicle: Vehicle, caller_sub_id: &str) -> Result<Vehicle, Error> {
        let caller = self.users.find_by_sub_id(caller_sub_id).await?;
        if vehicle.user_id != caller.id {
            return Err(wrong_user(&caller, &vehicle.user_id));
        }

        vehicle.validate(self.clock.utc())?;

        vehicle.id = self
            .repo
            .create(&vehicle)
            .await
            .map_err(map_vehicle_persistence_error)?;
        debug!(vehicle_id = %vehicle.id, user_id = %vehicle.user_id, "vehicle registered");
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Vehicle, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_vehicle_persistence_error)
    }

    async fn find_by_user_id(&self, user_id: &EntityId) -> Result<Vec<Vehicle>, Error> {
        self.repo
            .find_by_user_id(user_id)
            .await
            .map_err(map_vehicle_persistence_error)
    }

    async fn delete(
        &self,
        id: &EntityId,
        user_id: &EntityId,
        caller_sub_id: &str,
    ) -> Result<(), Error> {
        let caller = self.users.find_by_sub_id(caller_sub_id).await?;
        if *user_id != caller.id {
            return Err(wrong_user(&caller, user_id));
        }

        // The path owner is caller-supplied; authorise against the stored one.
        let vehicle = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_vehicle_persistence_error)?;
        if vehicle.user_id != caller.id {
            return Err(wrong_user(&caller, &vehicle.user_id));
        }

        self.repo
            .delete(id)
            .await
            .map_err(map_vehicle_persistence_error)?;
        debug!(vehicle_id = %id, "vehicle deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "vehicle_service_tests.rs"]
mod tests;
