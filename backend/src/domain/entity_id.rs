//! Opaque entity identifier backed by a document-store object id.

use std::fmt;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Raised when a string is not a 24 character hex object id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id {value:?}: expected 24 hexadecimal characters")]
pub struct InvalidEntityId {
    value: String,
}

impl InvalidEntityId {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Identifier for users and vehicles.
///
/// The zero value marks an entity that has not been persisted yet. Anything
/// else is a well-formed object id; malformed hex never yields an identifier.
///
/// # Examples
/// ```
/// use profile_backend::domain::EntityId;
///
/// let id = EntityId::parse("5f8d0d55b54764421b7156c3").expect("valid hex");
/// assert_eq!(id.to_hex(), "5f8d0d55b54764421b7156c3");
/// assert!(EntityId::zero().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(ObjectId);

impl EntityId {
    /// The unset identifier.
    #[must_use]
    pub fn zero() -> Self {
        Self(ObjectId::from_bytes([0; 12]))
    }

    /// Parse a 24 character hex string.
    pub fn parse(hex: &str) -> Result<Self, InvalidEntityId> {
        ObjectId::parse_str(hex)
            .map(Self)
            .map_err(|_| InvalidEntityId {
                value: hex.to_owned(),
            })
    }

    /// Lower-case hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Whether this is the unset identifier.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.bytes() == [0; 12]
    }

    /// Borrow the storage-native object id.
    #[must_use]
    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<ObjectId> for EntityId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<EntityId> for ObjectId {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for EntityId {
    type Err = InvalidEntityId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_hex()
    }
}

impl TryFrom<String> for EntityId {
    type Error = InvalidEntityId;

    // An empty string is how clients spell "not assigned yet".
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::zero());
        }
        Self::parse(&value)
    }
}
