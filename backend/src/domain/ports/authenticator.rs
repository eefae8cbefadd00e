//! Port for resolving a bearer token into the caller's identity.

use async_trait::async_trait;

use crate::domain::CallerIdentity;

use super::define_port_error;

define_port_error! {
    /// Failures raised by identity provider adapters.
    pub enum AuthenticationError {
        /// No credentials were supplied.
        MissingCredentials => "authorization header is missing",
        /// The identity provider refused the credentials.
        Rejected { message: String } => "credentials rejected: {message}",
        /// The identity provider could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Validates an `Authorization` header value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve `authorization` into the caller's subject and profile claims.
    async fn authenticate(&self, authorization: &str)
    -> Result<CallerIdentity, AuthenticationError>;
}

/// Fixture authenticator treating the bearer token as the subject id.
///
/// `Bearer abc` authenticates as subject `abc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthenticator;

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn authenticate(
        &self,
        authorization: &str,
    ) -> Result<CallerIdentity, AuthenticationError> {
        let token = authorization
            .strip_prefix("Bearer ")
            .map(str::trim)
            .unwrap_or_default();
        if token.is_empty() {
            return Err(AuthenticationError::missing_credentials());
        }
        Ok(CallerIdentity::new(token))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_uses_token_as_subject() {
        let caller = FixtureAuthenticator
            .authenticate("Bearer abc")
            .await
            .expect("token accepted");
        assert_eq!(caller.sub_id, "abc");
    }

    #[rstest]
    #[case("")]
    #[case("Bearer ")]
    #[case("Basic abc")]
    #[tokio::test]
    async fn fixture_rejects_missing_token(#[case] header: &str) {
        let err = FixtureAuthenticator
            .authenticate(header)
            .await
            .expect_err("no token");
        assert_eq!(err, AuthenticationError::MissingCredentials);
    }
}
