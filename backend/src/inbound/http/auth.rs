//! Bearer-token authentication for HTTP handlers.
//!
//! [`AuthenticatedCaller`] resolves the `Authorization` header through the
//! [`Authenticator`] port before a handler runs, so handlers receive the
//! caller's identity as an ordinary argument.
//!
//! [`Authenticator`]: crate::domain::ports::Authenticator

use std::ops::Deref;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::AuthenticationError;
use crate::domain::{CallerIdentity, Error};
use crate::inbound::http::state::HttpState;

/// Identity of the caller, extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub CallerIdentity);

impl AuthenticatedCaller {
    /// Consume the wrapper.
    pub fn into_inner(self) -> CallerIdentity {
        self.0
    }
}

impl Deref for AuthenticatedCaller {
    type Target = CallerIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn map_authentication_error(err: AuthenticationError) -> Error {
    if let AuthenticationError::Unavailable { message } = &err {
        warn!(%message, "identity provider unavailable");
    }
    Error::unauthorized(err.to_string())
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let header = header
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| map_authentication_error(AuthenticationError::missing_credentials()))?;
            state
                .authenticator
                .authenticate(&header)
                .await
                .map(AuthenticatedCaller)
                .map_err(map_authentication_error)
        })
    }
}
