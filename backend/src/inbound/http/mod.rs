//! HTTP inbound adapter exposing the profile REST endpoints.

pub mod auth;
pub mod error;
pub mod state;
pub mod users;
pub mod validation;
pub mod vehicles;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// `/users/me` is registered ahead of `/users/{id}` so it is not captured as
/// an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::current_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(vehicles::create_vehicle)
        .service(vehicles::list_vehicles)
        .service(vehicles::get_vehicle)
        .service(vehicles::delete_vehicle);
}
