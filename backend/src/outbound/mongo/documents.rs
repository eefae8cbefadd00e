//! Stored document shapes for the `users` and `vehicles` collections.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EntityId, Preferences, SignUpPhase, User, Vehicle};

/// Preferences sub-document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct PreferencesDocument {
    smoking: i32,
    conversation: i32,
    music: i32,
}

impl From<Preferences> for PreferencesDocument {
    fn from(value: Preferences) -> Self {
        Self {
            smoking: value.smoking,
            conversation: value.conversation,
            music: value.music,
        }
    }
}

impl From<PreferencesDocument> for Preferences {
    fn from(value: PreferencesDocument) -> Self {
        Self {
            smoking: value.smoking,
            conversation: value.conversation,
            music: value.music,
        }
    }
}

/// Document stored in `users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub(super) id: Option<ObjectId>,
    pub(super) sub_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    date_of_birth: Option<bson::DateTime>,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    photo: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    preferences: Option<PreferencesDocument>,
    #[serde(default)]
    sign_up_phase: String,
    #[serde(default)]
    user_rating: i32,
    #[serde(default)]
    driver_rating: i32,
}

fn object_id(id: &EntityId) -> Option<ObjectId> {
    (!id.is_zero()).then(|| *id.as_object_id())
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: object_id(&user.id),
            sub_id: user.sub_id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_of_birth: user.date_of_birth.map(to_bson_datetime),
            phone_number: user.phone_number.clone(),
            gender: user.gender.clone(),
            photo: user.photo.clone(),
            description: user.description.clone(),
            preferences: user.preferences.map(PreferencesDocument::from),
            sign_up_phase: user.sign_up_phase.as_str().to_owned(),
            user_rating: user.user_rating,
            driver_rating: user.driver_rating,
        }
    }
}

/// A stored document that no longer maps onto the domain model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {field} is invalid: {value:?}")]
pub(super) struct CorruptDocument {
    field: &'static str,
    value: String,
}

impl TryFrom<UserDocument> for User {
    type Error = CorruptDocument;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let sign_up_phase = match doc.sign_up_phase.as_str() {
            "" => SignUpPhase::default(),
            raw => raw.parse::<SignUpPhase>().map_err(|_| CorruptDocument {
                field: "signUpPhase",
                value: doc.sign_up_phase.clone(),
            })?,
        };
        Ok(Self {
            id: doc.id.map(EntityId::from).unwrap_or_default(),
            sub_id: doc.sub_id,
            email: doc.email,
            first_name: doc.first_name,
            last_name: doc.last_name,
            date_of_birth: doc.date_of_birth.and_then(from_bson_datetime),
            phone_number: doc.phone_number,
            gender: doc.gender,
            photo: doc.photo,
            description: doc.description,
            preferences: doc.preferences.map(Preferences::from),
            sign_up_phase,
            user_rating: doc.user_rating,
            driver_rating: doc.driver_rating,
        })
    }
}

/// Document stored in `vehicles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VehicleDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub(super) id: Option<ObjectId>,
    pub(super) user_id: ObjectId,
    #[serde(default)]
    year: i32,
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    photo: String,
    #[serde(default)]
    seats: i32,
    #[serde(default)]
    accessories: Vec<String>,
}

impl From<&Vehicle> for VehicleDocument {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: object_id(&vehicle.id),
            user_id: *vehicle.user_id.as_object_id(),
            year: vehicle.year,
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            color: vehicle.color.clone(),
            photo: vehicle.photo.clone(),
            seats: vehicle.seats,
            accessories: vehicle.accessories.clone(),
        }
    }
}

impl From<VehicleDocument> for Vehicle {
    fn from(doc: VehicleDocument) -> Self {
        Self {
            id: doc.id.map(EntityId::from).unwrap_or_default(),
            user_id: doc.user_id.into(),
            year: doc.year,
            make: doc.make,
            model: doc.model,
            color: doc.color,
            photo: doc.photo,
            seats: doc.seats,
            accessories: doc.accessories,
        }
    }
}
