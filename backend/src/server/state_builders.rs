//! Builders wiring repositories and adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use profile_backend::domain::ports::{
    Authenticator, UserRepository, UserUseCase, VehicleRepository, VehicleUseCase,
};
use profile_backend::domain::{UserService, VehicleService};
use profile_backend::inbound::http::state::HttpState;

/// Compose the user and vehicle services over the given repositories.
///
/// The vehicle service resolves callers through the same user service the
/// handlers use.
pub(crate) fn build_http_state<U, V>(
    user_repo: Arc<U>,
    vehicle_repo: Arc<V>,
    authenticator: Arc<dyn Authenticator>,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState>
where
    U: UserRepository + 'static,
    V: VehicleRepository + 'static,
{
    let users: Arc<dyn UserUseCase> = Arc::new(UserService::new(user_repo, clock.clone()));
    let vehicles: Arc<dyn VehicleUseCase> =
        Arc::new(VehicleService::new(vehicle_repo, users.clone(), clock));
    web::Data::new(HttpState::new(users, vehicles, authenticator))
}

/// Production clock.
pub(crate) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(DefaultClock)
}
