//! Authenticator backed by an OpenID Connect `/userinfo` endpoint.
//!
//! The caller's `Authorization` header is forwarded verbatim; the provider
//! decides whether the token is valid and answers with the profile claims.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::debug;

use crate::domain::CallerIdentity;
use crate::domain::ports::{AuthenticationError, Authenticator};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Claims returned by the identity provider.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserInfoClaims {
    sub: String,
    given_name: String,
    family_name: String,
    email: String,
    picture: String,
}

impl From<UserInfoClaims> for CallerIdentity {
    fn from(claims: UserInfoClaims) -> Self {
        Self {
            sub_id: claims.sub,
            first_name: claims.given_name,
            last_name: claims.family_name,
            email: claims.email,
            picture: claims.picture,
        }
    }
}

/// Resolves bearer tokens by calling `https://<domain>/userinfo`.
#[derive(Debug, Clone)]
pub struct UserInfoAuthenticator {
    client: reqwest::Client,
    endpoint: String,
}

impl UserInfoAuthenticator {
    /// Build an authenticator for the given identity provider domain.
    ///
    /// # Errors
    /// Returns the underlying `reqwest` error when the HTTP client cannot be
    /// constructed (for example when TLS initialisation fails).
    pub fn new(domain: &str) -> Result<Self, reqwest::Error> {
        Self::with_timeout(domain, DEFAULT_TIMEOUT)
    }

    /// Build an authenticator with an explicit request timeout.
    pub fn with_timeout(domain: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: userinfo_endpoint(domain),
        })
    }

    /// URL the authenticator calls.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn userinfo_endpoint(domain: &str) -> String {
    let host = domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{host}/userinfo")
}

fn rejection(status: StatusCode) -> AuthenticationError {
    AuthenticationError::rejected(format!("identity provider answered {status}"))
}

#[async_trait]
impl Authenticator for UserInfoAuthenticator {
    async fn authenticate(
        &self,
        authorization: &str,
    ) -> Result<CallerIdentity, AuthenticationError> {
        if authorization.trim().is_empty() {
            return Err(AuthenticationError::missing_credentials());
        }

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|err| AuthenticationError::unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "userinfo request refused");
            return Err(rejection(status));
        }

        let claims: UserInfoClaims = response
            .json()
            .await
            .map_err(|err| AuthenticationError::rejected(err.to_string()))?;
        if claims.sub.is_empty() {
            return Err(AuthenticationError::rejected("userinfo response has no subject"));
        }
        Ok(claims.into())
    }
}
