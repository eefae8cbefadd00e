//! Domain primitives, aggregates and services.
//!
//! Purpose: hold the profile rules (validation, sign-up phase, ownership) with
//! no knowledge of HTTP or the document store. Adapters talk to the domain
//! through [`ports`].
//!
//! Public surface:
//! - `EntityId`: object-id backed identifier with a zero value.
//! - `User`, `UserPatch`, `Vehicle`, `Preferences`: entities and updates.
//! - `UserService`, `VehicleService`: use-case implementations.
//! - `Error`, `ErrorCode`: transport-agnostic failures.

pub mod caller;
pub mod compensation;
pub mod entity_id;
pub mod error;
pub mod ports;
pub mod preferences;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod vehicle;
pub mod vehicle_service;

pub use self::caller::CallerIdentity;
pub use self::compensation::present_or_compensate;
pub use self::entity_id::{EntityId, InvalidEntityId};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::preferences::{
    PREFERENCE_NEVER, PREFERENCE_OCCASIONALLY, PREFERENCE_REGULARLY, Preferences,
    PreferencesPatch, PreferencesValidationError,
};
pub use self::trace_id::TraceId;
pub use self::user::{Gender, SignUpPhase, User, UserPatch, UserValidationError};
pub use self::user_service::UserService;
pub use self::vehicle::{Vehicle, VehicleValidationError};
pub use self::vehicle_service::VehicleService;
