//! Driving port for vehicle registration, lookup and removal.

use async_trait::async_trait;

use crate::domain::{EntityId, Error, Vehicle};

/// Use cases inbound adapters invoke for vehicles.
///
/// Mutations take the caller's subject explicitly so ownership can be
/// checked against the caller's own user record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleUseCase: Send + Sync {
    /// Register `vehicle` for the caller identified by `caller_sub_id`.
    async fn register(&self, vehicle: Vehicle, caller_sub_id: &str) -> Result<Vehicle, Error>;

    /// Look a vehicle up by id.
    async fn find_by_id(&self, id: &EntityId) -> Result<Vehicle, Error>;

    /// List the vehicles owned by `user_id`.
    async fn find_by_user_id(&self, user_id: &EntityId) -> Result<Vec<Vehicle>, Error>;

    /// Delete vehicle `id` listed under `user_id` on behalf of the caller.
    async fn delete(
        &self,
        id: &EntityId,
        user_id: &EntityId,
        caller_sub_id: &str,
    ) -> Result<(), Error>;
}
