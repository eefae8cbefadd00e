//! MongoDB-backed implementation of the `UserRepository` port.

use async_trait::async_trait;
use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::warn;

use super::documents::UserDocument;
use super::error_mapping::map_mongo_error;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EntityId, User};

fn map_error(err: mongodb::error::Error) -> UserPersistenceError {
    map_mongo_error(
        err,
        UserPersistenceError::duplicate,
        UserPersistenceError::connection,
        UserPersistenceError::query,
    )
}

fn decode(document: UserDocument) -> Result<User, UserPersistenceError> {
    User::try_from(document).map_err(|err| {
        warn!(error = %err, "user document failed to decode");
        UserPersistenceError::query(err.to_string())
    })
}

/// User repository over the `users` collection.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub(super) const COLLECTION: &'static str = "users";

    pub(super) fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }

    /// Unique index on `subId` so concurrent registrations cannot both land.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! { "subId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn find_one(&self, filter: bson::Document) -> Result<User, UserPersistenceError> {
        let document = self
            .collection
            .find_one(filter)
            .await
            .map_err(map_error)?
            .ok_or(UserPersistenceError::NotFound)?;
        decode(document)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<User, UserPersistenceError> {
        self.find_one(doc! { "_id": *id.as_object_id() }).await
    }

    async fn find_by_sub_id(&self, sub_id: &str) -> Result<User, UserPersistenceError> {
        self.find_one(doc! { "subId": sub_id }).await
    }

    async fn create(&self, user: &User) -> Result<EntityId, UserPersistenceError> {
        let mut document = UserDocument::from(user);
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
            .ok_or_else(|| UserPersistenceError::query("inserted id is not an ObjectId"))
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut fields = bson::to_document(&UserDocument::from(user))
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        // The subject is fixed at registration.
        fields.remove("_id");
        fields.remove("subId");

        let result = self
            .collection
            .update_one(doc! { "_id": *user.id.as_object_id() }, doc! { "$set": fields })
            .await
            .map_err(map_error)?;
        if result.matched_count == 0 {
            return Err(UserPersistenceError::not_found());
        }
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), UserPersistenceError> {
        self.collection
            .delete_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(map_error)?;
        Ok(())
    }
}
