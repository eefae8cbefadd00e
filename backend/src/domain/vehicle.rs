//! Vehicle model and validation.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// Oldest model year accepted.
pub const YEAR_MINIMUM: i32 = 1900;
/// Fewest seats a vehicle may offer.
pub const SEATS_MINIMUM: i32 = 1;

/// Validation failures for [`Vehicle`], in check order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VehicleValidationError {
    /// Owner id is zero.
    #[error("user id must not be nil")]
    MissingOwner,
    /// Model year outside `min..=max`.
    #[error("year must be between {min} and {max}")]
    YearOutOfBounds {
        /// Lowest accepted year.
        min: i32,
        /// Current year at validation time.
        max: i32,
    },
    /// Make is empty.
    #[error("make is missing")]
    MissingMake,
    /// Colour is empty.
    #[error("color is missing")]
    MissingColor,
    /// Fewer than [`SEATS_MINIMUM`] seats.
    #[error("minimum number of seats is {SEATS_MINIMUM}")]
    TooFewSeats,
}

impl VehicleValidationError {
    /// Name of the offending field as clients see it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingOwner => "userId",
            Self::YearOutOfBounds { .. } => "year",
            Self::MissingMake => "make",
            Self::MissingColor => "color",
            Self::TooFewSeats => "seats",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingOwner | Self::MissingMake | Self::MissingColor => "missing",
            Self::YearOutOfBounds { .. } | Self::TooFewSeats => "out_of_bounds",
        }
    }
}

/// A vehicle owned by a user. Vehicles are created or deleted, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Storage id, zero until the vehicle is created.
    pub id: EntityId,
    /// Owning user.
    pub user_id: EntityId,
    /// Model year.
    pub year: i32,
    /// Manufacturer.
    pub make: String,
    /// Model name, may be empty.
    pub model: String,
    /// Body colour.
    pub color: String,
    /// Picture URL.
    pub photo: String,
    /// Passenger seats offered.
    pub seats: i32,
    /// Free-form extras such as a bike rack.
    pub accessories: Vec<String>,
}

impl Vehicle {
    /// Check every invariant, stopping at the first failure.
    ///
    /// `model` is optional while `make` is not.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), VehicleValidationError> {
        if self.user_id.is_zero() {
            return Err(VehicleValidationError::MissingOwner);
        }
        let max = now.year();
        if !(YEAR_MINIMUM..=max).contains(&self.year) {
            return Err(VehicleValidationError::YearOutOfBounds {
                min: YEAR_MINIMUM,
                max,
            });
        }
        if self.make.is_empty() {
            return Err(VehicleValidationError::MissingMake);
        }
        if self.color.is_empty() {
            return Err(VehicleValidationError::MissingColor);
        }
        if self.seats < SEATS_MINIMUM {
            return Err(VehicleValidationError::TooFewSeats);
        }
        Ok(())
    }
}
