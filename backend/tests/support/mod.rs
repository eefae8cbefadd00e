//! Shared harness for HTTP integration tests.
//!
//! Builds the real handlers and services over in-memory repositories. The
//! fixture authenticator treats `Bearer <sub>` as subject `<sub>`.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::Value;

use profile_backend::Trace;
use profile_backend::domain::ports::{FixtureAuthenticator, UserUseCase, VehicleUseCase};
use profile_backend::domain::{UserService, VehicleService};
use profile_backend::inbound::http::configure;
use profile_backend::inbound::http::state::HttpState;
use profile_backend::test_support::{FixedClock, InMemoryUserRepository, InMemoryVehicleRepository};

/// Repositories behind a test application, kept for direct inspection.
pub struct Backing {
    pub users: Arc<InMemoryUserRepository>,
    pub vehicles: Arc<InMemoryVehicleRepository>,
}

pub fn state() -> (web::Data<HttpState>, Backing) {
    let backing = Backing {
        users: Arc::new(InMemoryUserRepository::default()),
        vehicles: Arc::new(InMemoryVehicleRepository::default()),
    };
    let clock = Arc::new(FixedClock::at(2024, 6, 1));
    let users: Arc<dyn UserUseCase> =
        Arc::new(UserService::new(backing.users.clone(), clock.clone()));
    let vehicles: Arc<dyn VehicleUseCase> = Arc::new(VehicleService::new(
        backing.vehicles.clone(),
        users.clone(),
        clock,
    ));
    let state = web::Data::new(HttpState::new(
        users,
        vehicles,
        Arc::new(FixtureAuthenticator),
    ));
    (state, backing)
}

pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await
}

pub fn bearer(sub_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {sub_id}"))
}

pub fn registration_body() -> Value {
    serde_json::json!({
        "firstName": "A",
        "lastName": "B",
        "dateOfBirth": "1990-01-01T00:00:00Z",
        "gender": "Male"
    })
}

pub async fn body_json(res: ServiceResponse) -> Value {
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
