//! MongoDB persistence adapters.
//!
//! Thin translators between domain entities and the `users` / `vehicles`
//! collections. Document structs stay private to this module; repositories
//! map driver failures onto the domain persistence errors and hold nothing
//! but a collection handle.

mod client;
mod documents;
mod error_mapping;
mod user_repository;
mod vehicle_repository;

pub use client::{MongoConfig, MongoConnectError, MongoStore};
pub use user_repository::MongoUserRepository;
pub use vehicle_repository::MongoVehicleRepository;
