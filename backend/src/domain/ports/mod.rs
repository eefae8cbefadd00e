//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, the authenticator) expose typed errors that
//! services translate into [`crate::domain::Error`]. Driving ports are what
//! inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod user_repository;
mod user_use_case;
mod vehicle_repository;
mod vehicle_use_case;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{AuthenticationError, Authenticator, FixtureAuthenticator};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_use_case::MockUserUseCase;
pub use user_use_case::UserUseCase;
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
pub use vehicle_repository::{
    FixtureVehicleRepository, VehiclePersistenceError, VehicleRepository,
};
#[cfg(test)]
pub use vehicle_use_case::MockVehicleUseCase;
pub use vehicle_use_case::VehicleUseCase;
