//! Port abstraction for vehicle persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EntityId, Vehicle};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vehicle repository adapters.
    pub enum VehiclePersistenceError {
        /// No vehicle matched the lookup.
        NotFound => "vehicle not found",
        /// A unique constraint rejected the write.
        Duplicate { message: String } => "vehicle already exists: {message}",
        /// Repository connection could not be established.
        Connection { message: String } => "vehicle repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vehicle repository query failed: {message}",
    }
}

/// Storage for [`Vehicle`] records. There is no update; vehicles are
/// replaced by delete and create.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Fetch a vehicle by identifier.
    async fn find_by_id(&self, id: &EntityId) -> Result<Vehicle, VehiclePersistenceError>;

    /// All vehicles owned by `user_id` in insertion order; empty when none.
    async fn find_by_user_id(
        &self,
        user_id: &EntityId,
    ) -> Result<Vec<Vehicle>, VehiclePersistenceError>;

    /// Insert a new vehicle and return the identifier the store assigned.
    async fn create(&self, vehicle: &Vehicle) -> Result<EntityId, VehiclePersistenceError>;

    /// Remove a vehicle.
    async fn delete(&self, id: &EntityId) -> Result<(), VehiclePersistenceError>;
}

/// Fixture repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVehicleRepository;

#[async_trait]
impl VehicleRepository for FixtureVehicleRepository {
    async fn find_by_id(&self, _id: &EntityId) -> Result<Vehicle, VehiclePersistenceError> {
        Err(VehiclePersistenceError::not_found())
    }

    async fn find_by_user_id(
        &self,
        _user_id: &EntityId,
    ) -> Result<Vec<Vehicle>, VehiclePersistenceError> {
        Ok(Vec::new())
    }

    async fn create(&self, _vehicle: &Vehicle) -> Result<EntityId, VehiclePersistenceError> {
        Ok(bson::oid::ObjectId::new().into())
    }

    async fn delete(&self, _id: &EntityId) -> Result<(), VehiclePersistenceError> {
        Ok(())
    }
}
