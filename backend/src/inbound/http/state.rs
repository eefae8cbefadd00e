//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on
//! domain ports, so they stay testable without a database or identity
//! provider.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, UserUseCase, VehicleUseCase};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User profile use cases.
    pub users: Arc<dyn UserUseCase>,
    /// Vehicle use cases.
    pub vehicles: Arc<dyn VehicleUseCase>,
    /// Resolves bearer tokens to callers.
    pub authenticator: Arc<dyn Authenticator>,
}

impl HttpState {
    /// Bundle the use cases and the authenticator.
    pub fn new(
        users: Arc<dyn UserUseCase>,
        vehicles: Arc<dyn VehicleUseCase>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            users,
            vehicles,
            authenticator,
        }
    }
}
