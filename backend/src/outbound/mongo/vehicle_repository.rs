//! MongoDB-backed implementation of the `VehicleRepository` port.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::{Collection, IndexModel};

use super::documents::VehicleDocument;
use super::error_mapping::map_mongo_error;
use crate::domain::ports::{VehiclePersistenceError, VehicleRepository};
use crate::domain::{EntityId, Vehicle};

fn map_error(err: mongodb::error::Error) -> VehiclePersistenceError {
    map_mongo_error(
        err,
        VehiclePersistenceError::duplicate,
        VehiclePersistenceError::connection,
        VehiclePersistenceError::query,
    )
}

/// Vehicle repository over the `vehicles` collection.
#[derive(Clone, Debug)]
pub struct MongoVehicleRepository {
    collection: Collection<VehicleDocument>,
}

impl MongoVehicleRepository {
    pub(super) const COLLECTION: &'static str = "vehicles";

    pub(super) fn new(collection: Collection<VehicleDocument>) -> Self {
        Self { collection }
    }

    /// Index on `userId` backing owner listings.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder().keys(doc! { "userId": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for MongoVehicleRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Vehicle, VehiclePersistenceError> {
        self.collection
            .find_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(map_error)?
            .map(Vehicle::from)
            .ok_or(VehiclePersistenceError::NotFound)
    }

    async fn find_by_user_id(
        &self,
        user_id: &EntityId,
    ) -> Result<Vec<Vehicle>, VehiclePersistenceError> {
        let cursor = self
            .collection
            .find(doc! { "userId": *user_id.as_object_id() })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_error)?;
        let documents: Vec<VehicleDocument> = cursor.try_collect().await.map_err(map_error)?;
        Ok(documents.into_iter().map(Vehicle::from).collect())
    }

    async fn create(&self, vehicle: &Vehicle) -> Result<EntityId, VehiclePersistenceError> {
        let mut document = VehicleDocument::from(vehicle);
        document.id = None;
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_error)?;
        result
            .inserted_id
            .as_object_id()
            .map(EntityId::from)
            .ok_or_else(|| VehiclePersistenceError::query("inserted id is not an ObjectId"))
    }

    async fn delete(&self, id: &EntityId) -> Result<(), VehiclePersistenceError> {
        self.collection
            .delete_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(map_error)?;
        Ok(())
    }
}
