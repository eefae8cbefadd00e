//! Test utilities for the backend crate.
//!
//! In-memory adapters for the repository ports and a fixed clock, shared by
//! unit and integration tests. Compiled only with the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    UserPersistenceError, UserRepository, VehiclePersistenceError, VehicleRepository,
};
use crate::domain::{EntityId, User, Vehicle};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock reading midday UTC on the given date.
    ///
    /// # Panics
    /// Panics when the date does not exist.
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        match Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single() {
            Some(now) => Self(now),
            None => panic!("invalid fixture date {year}-{month}-{day}"),
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// User repository held in memory.
///
/// Assigns fresh ObjectIds and rejects a second user with the same subject,
/// as the unique index does in MongoDB.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    /// Number of stored users.
    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<User, UserPersistenceError> {
        lock(&self.users)
            .get(id.as_object_id())
            .cloned()
            .ok_or(UserPersistenceError::NotFound)
    }

    async fn find_by_sub_id(&self, sub_id: &str) -> Result<User, UserPersistenceError> {
        lock(&self.users)
            .values()
            .find(|user| user.sub_id == sub_id)
            .cloned()
            .ok_or(UserPersistenceError::NotFound)
    }

    async fn create(&self, user: &User) -> Result<EntityId, UserPersistenceError> {
        let mut users = lock(&self.users);
        if users.values().any(|stored| stored.sub_id == user.sub_id) {
            return Err(UserPersistenceError::duplicate(format!(
                "subId {:?} already registered",
                user.sub_id
            )));
        }
        let id = ObjectId::new();
        let mut stored = user.clone();
        stored.id = id.into();
        users.insert(id, stored);
        Ok(id.into())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users);
        let stored = users
            .get_mut(user.id.as_object_id())
            .ok_or(UserPersistenceError::NotFound)?;
        let sub_id = std::mem::take(&mut stored.sub_id);
        *stored = User {
            sub_id,
            ..user.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), UserPersistenceError> {
        lock(&self.users).remove(id.as_object_id());
        Ok(())
    }
}

/// Vehicle repository held in memory.
///
/// Listings come back in creation order because ObjectIds increase.
#[derive(Debug, Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Mutex<BTreeMap<ObjectId, Vehicle>>,
}

impl InMemoryVehicleRepository {
    /// Number of stored vehicles.
    pub fn len(&self) -> usize {
        lock(&self.vehicles).len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `vehicle` directly, bypassing the service checks.
    pub fn seed(&self, vehicle: Vehicle) -> EntityId {
        let id = ObjectId::new();
        lock(&self.vehicles).insert(
            id,
            Vehicle {
                id: id.into(),
                ..vehicle
            },
        );
        id.into()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Vehicle, VehiclePersistenceError> {
        lock(&self.vehicles)
            .get(id.as_object_id())
            .cloned()
            .ok_or(VehiclePersistenceError::NotFound)
    }

    async fn find_by_user_id(
        &self,
        user_id: &EntityId,
    ) -> Result<Vec<Vehicle>, VehiclePersistenceError> {
        Ok(lock(&self.vehicles)
            .values()
            .filter(|vehicle| vehicle.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, vehicle: &Vehicle) -> Result<EntityId, VehiclePersistenceError> {
        Ok(self.seed(vehicle.clone()))
    }

    async fn delete(&self, id: &EntityId) -> Result<(), VehiclePersistenceError> {
        lock(&self.vehicles).remove(id.as_object_id());
        Ok(())
    }
}
