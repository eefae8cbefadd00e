//! Identity of the authenticated caller.

use serde::{Deserialize, Serialize};

/// Claims resolved from a bearer token by the [`Authenticator`] port.
///
/// Use cases receive this explicitly; nothing reads it from ambient request
/// state.
///
/// [`Authenticator`]: crate::domain::ports::Authenticator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Identity provider subject.
    pub sub_id: String,
    /// `given_name` claim.
    pub first_name: String,
    /// `family_name` claim.
    pub last_name: String,
    /// `email` claim.
    pub email: String,
    /// `picture` claim, an avatar URL.
    pub picture: String,
}

impl CallerIdentity {
    /// Identity with only a subject, as used by tests and service calls.
    pub fn new(sub_id: impl Into<String>) -> Self {
        Self {
            sub_id: sub_id.into(),
            ..Self::default()
        }
    }
}
