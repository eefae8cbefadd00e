//! User profile model, validation rules and partial-update merge.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Preferences, PreferencesPatch, PreferencesValidationError};

/// Seconds in eighteen years of 365.25 days.
const AGE_MINIMUM_SECS: i64 = 18 * 36_525 * 864;

/// Youngest age a registered user may have.
pub fn age_minimum() -> Duration {
    Duration::seconds(AGE_MINIMUM_SECS)
}

/// Lowest accepted rating.
pub const RATING_MIN: i32 = 0;
/// Highest accepted rating.
pub const RATING_MAX: i32 = 5;

/// Validation failures for [`User`], in check order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identity provider subject is empty.
    #[error("subscription ID is missing")]
    MissingSubId,
    /// First name is empty.
    #[error("first name is missing")]
    MissingFirstName,
    /// Last name is empty.
    #[error("last name is missing")]
    MissingLastName,
    /// Date of birth was not supplied.
    #[error("date of birth is missing")]
    MissingDateOfBirth,
    /// Younger than [`age_minimum`] at validation time.
    #[error("must be 18 years of age or older")]
    Underage,
    /// Gender is empty.
    #[error("gender is missing")]
    MissingGender,
    /// Gender is not one of the [`Gender`] names.
    #[error("gender must be Male, Female or Other")]
    InvalidGender,
    /// A preference rating failed its own check.
    #[error(transparent)]
    Preferences(#[from] PreferencesValidationError),
    /// Sign-up phase is not one of the [`SignUpPhase`] names.
    #[error("sign up phase must be personalInfo, preferences or done")]
    InvalidSignUpPhase,
    /// User rating lies outside `RATING_MIN..=RATING_MAX`.
    #[error("user rating is not between 0 and 5")]
    UserRatingOutOfBounds,
    /// Driver rating lies outside `RATING_MIN..=RATING_MAX`.
    #[error("driver rating is not between 0 and 5")]
    DriverRatingOutOfBounds,
}

impl UserValidationError {
    /// Name of the offending field as clients see it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingSubId => "subId",
            Self::MissingFirstName => "firstName",
            Self::MissingLastName => "lastName",
            Self::MissingDateOfBirth | Self::Underage => "dateOfBirth",
            Self::MissingGender | Self::InvalidGender => "gender",
            Self::Preferences(err) => err.field(),
            Self::InvalidSignUpPhase => "signUpPhase",
            Self::UserRatingOutOfBounds => "userRating",
            Self::DriverRatingOutOfBounds => "driverRating",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSubId
            | Self::MissingFirstName
            | Self::MissingLastName
            | Self::MissingDateOfBirth
            | Self::MissingGender => "missing",
            Self::Underage => "underage",
            Self::InvalidGender | Self::InvalidSignUpPhase => "invalid_value",
            Self::Preferences(err) => err.code(),
            Self::UserRatingOutOfBounds | Self::DriverRatingOutOfBounds => "out_of_bounds",
        }
    }
}

/// Accepted values for [`User::gender`].
///
/// Profiles hold the gender as submitted; [`User::validate`] parses it into
/// this enum in its place in the check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// `"Male"`.
    Male,
    /// `"Female"`.
    Female,
    /// `"Other"`.
    Other,
}

impl Gender {
    /// Canonical name, as stored and serialised.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(UserValidationError::MissingGender),
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            _ => Err(UserValidationError::InvalidGender),
        }
    }
}

/// Progress through the multi-step sign-up flow.
///
/// Moves forward `personalInfo → preferences → done` by convention only; the
/// phase supplied on update is stored as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignUpPhase {
    /// Name, birth date and gender are being collected.
    #[default]
    PersonalInfo,
    /// Travel preferences are being collected.
    Preferences,
    /// Sign-up is complete.
    Done,
}

impl SignUpPhase {
    /// Canonical camelCase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personalInfo",
            Self::Preferences => "preferences",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SignUpPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignUpPhase {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personalInfo" => Ok(Self::PersonalInfo),
            "preferences" => Ok(Self::Preferences),
            "done" => Ok(Self::Done),
            _ => Err(UserValidationError::InvalidSignUpPhase),
        }
    }
}

/// A registered (or registering) user.
///
/// `sub_id` is the identity provider subject. It is fixed at registration
/// and never serialised outward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Storage id, zero until the user is created.
    pub id: EntityId,
    /// Identity provider subject.
    #[serde(skip_serializing, default)]
    pub sub_id: String,
    /// Email taken from the identity claims at registration.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth; must put the user at or over [`age_minimum`].
    pub date_of_birth: Option<DateTime<Utc>>,
    /// Contact number, free-form.
    pub phone_number: String,
    /// Gender as submitted; must name a [`Gender`] variant.
    pub gender: String,
    /// Avatar URL.
    pub photo: String,
    /// Free-text self description.
    pub description: String,
    /// Travel preferences, absent until the preferences phase.
    pub preferences: Option<Preferences>,
    /// Current sign-up step.
    pub sign_up_phase: SignUpPhase,
    /// Rating as a passenger, `RATING_MIN..=RATING_MAX`.
    pub user_rating: i32,
    /// Rating as a driver, `RATING_MIN..=RATING_MAX`.
    pub driver_rating: i32,
}

fn rating_in_range(value: i32) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&value)
}

impl User {
    /// Check every invariant, stopping at the first failure.
    ///
    /// A user without preferences is valid so that sign-up can collect them
    /// in a later phase.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), UserValidationError> {
        if self.sub_id.is_empty() {
            return Err(UserValidationError::MissingSubId);
        }
        if self.first_name.is_empty() {
            return Err(UserValidationError::MissingFirstName);
        }
        if self.last_name.is_empty() {
            return Err(UserValidationError::MissingLastName);
        }
        let Some(date_of_birth) = self.date_of_birth else {
            return Err(UserValidationError::MissingDateOfBirth);
        };
        if now.signed_duration_since(date_of_birth) < age_minimum() {
            return Err(UserValidationError::Underage);
        }
        self.gender.parse::<Gender>()?;
        if let Some(preferences) = &self.preferences {
            preferences.validate()?;
        }
        if !rating_in_range(self.user_rating) {
            return Err(UserValidationError::UserRatingOutOfBounds);
        }
        if !rating_in_range(self.driver_rating) {
            return Err(UserValidationError::DriverRatingOutOfBounds);
        }
        Ok(())
    }
}

/// Field-level update for a stored [`User`].
///
/// Each `Some` field replaces the stored value; `None` leaves it untouched.
/// `id`, `sub_id` and `email` are not patchable; the email follows the
/// identity claims captured at registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement date of birth.
    pub date_of_birth: Option<DateTime<Utc>>,
    /// Replacement contact number.
    pub phone_number: Option<String>,
    /// Replacement gender, checked when the merged user is validated.
    pub gender: Option<String>,
    /// Replacement avatar URL.
    pub photo: Option<String>,
    /// Replacement self description.
    pub description: Option<String>,
    /// Per-rating preference changes.
    pub preferences: Option<PreferencesPatch>,
    /// Replacement sign-up step.
    pub sign_up_phase: Option<SignUpPhase>,
    /// Replacement passenger rating.
    pub user_rating: Option<i32>,
    /// Replacement driver rating.
    pub driver_rating: Option<i32>,
}

impl UserPatch {
    /// Merge the present fields into `user`.
    pub fn apply(self, user: &mut User) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut user.first_name, self.first_name);
        set(&mut user.last_name, self.last_name);
        if self.date_of_birth.is_some() {
            user.date_of_birth = self.date_of_birth;
        }
        set(&mut user.phone_number, self.phone_number);
        set(&mut user.gender, self.gender);
        set(&mut user.photo, self.photo);
        set(&mut user.description, self.description);
        if let Some(patch) = self.preferences {
            user.preferences = Some(patch.apply(user.preferences));
        }
        set(&mut user.sign_up_phase, self.sign_up_phase);
        set(&mut user.user_rating, self.user_rating);
        set(&mut user.driver_rating, self.driver_rating);
    }
}
