//! Connection setup for the document store.

use std::time::Duration;

use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use tracing::info;

use super::{MongoUserRepository, MongoVehicleRepository};

/// Failures while establishing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MongoConnectError {
    /// The connection options were rejected.
    #[error("invalid MongoDB options: {message}")]
    Options {
        /// Driver error text.
        message: String,
    },
    /// Index creation failed at start-up.
    #[error("failed to prepare MongoDB collections: {message}")]
    Indexes {
        /// Driver error text.
        message: String,
    },
}

/// Connection settings for the document store.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use profile_backend::outbound::mongo::MongoConfig;
///
/// let config = MongoConfig::new("db.internal", "profiles")
///     .with_credentials("svc", "p@ss/word")
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.uri(), "mongodb://db.internal");
/// let credential = config.credential().expect("credentials set");
/// assert_eq!(credential.password.as_deref(), Some("p@ss/word"));
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    host: String,
    database: String,
    credentials: Option<(String, String)>,
    connection_timeout: Duration,
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("has_credentials", &self.credentials.is_some())
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

impl MongoConfig {
    /// Settings for `host` and `database` with a ten second timeout.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            credentials: None,
            connection_timeout: Duration::from_secs(10),
        }
    }

    /// Authenticate as `username`.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Bound connection and server selection time.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Connection string, `mongodb://host`.
    ///
    /// Credentials travel separately through [`Self::credential`], so
    /// reserved characters in them need no escaping.
    pub fn uri(&self) -> String {
        format!("mongodb://{}", self.host)
    }

    /// Driver credential for the configured user, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.credentials.as_ref().map(|(username, password)| {
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build()
        })
    }

    /// Database holding the collections.
    pub fn database(&self) -> &str {
        self.database.as_str()
    }
}

/// Handle to the profile database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client from `config`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on first
    /// use as a connection error rather than here.
    pub async fn connect(config: &MongoConfig) -> Result<Self, MongoConnectError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| MongoConnectError::Options {
                message: err.to_string(),
            })?;
        options.connect_timeout = Some(config.connection_timeout);
        options.server_selection_timeout = Some(config.connection_timeout);
        options.app_name = Some("profile-backend".to_owned());
        options.credential = config.credential();

        let client = Client::with_options(options).map_err(|err| MongoConnectError::Options {
            message: err.to_string(),
        })?;
        info!(database = config.database(), "MongoDB client configured");
        Ok(Self {
            database: client.database(config.database()),
        })
    }

    /// Repository over the `users` collection.
    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository::new(self.database.collection(MongoUserRepository::COLLECTION))
    }

    /// Repository over the `vehicles` collection.
    pub fn vehicles(&self) -> MongoVehicleRepository {
        MongoVehicleRepository::new(self.database.collection(MongoVehicleRepository::COLLECTION))
    }

    /// Create the indexes both repositories rely on.
    pub async fn ensure_indexes(&self) -> Result<(), MongoConnectError> {
        let to_error = |err: mongodb::error::Error| MongoConnectError::Indexes {
            message: err.to_string(),
        };
        self.users().ensure_indexes().await.map_err(to_error)?;
        self.vehicles().ensure_indexes().await.map_err(to_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn uri_without_credentials() {
        let config = MongoConfig::new("localhost:27017", "profiles");
        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.database(), "profiles");
    }

    #[rstest]
    fn reserved_characters_stay_out_of_the_uri() {
        let config = MongoConfig::new("db.internal:27017", "profiles")
            .with_credentials("svc:ops", "p@ss/word");
        assert_eq!(config.uri(), "mongodb://db.internal:27017");

        let credential = config.credential().expect("credentials set");
        assert_eq!(credential.username.as_deref(), Some("svc:ops"));
        assert_eq!(credential.password.as_deref(), Some("p@ss/word"));
    }

    #[rstest]
    fn no_credential_without_username() {
        assert!(MongoConfig::new("db", "profiles").credential().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn connect_accepts_reserved_characters_in_password() {
        let config = MongoConfig::new("127.0.0.1:1", "profiles")
            .with_credentials("svc", "p@ss/word")
            .with_connection_timeout(Duration::from_millis(50));
        MongoStore::connect(&config)
            .await
            .expect("options accept the credential");
    }

    #[rstest]
    fn debug_output_hides_password() {
        let config = MongoConfig::new("db", "profiles").with_credentials("svc", "hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("has_credentials: true"));
    }

    #[rstest]
    #[tokio::test]
    async fn connect_is_lazy() {
        let config = MongoConfig::new("127.0.0.1:1", "profiles")
            .with_connection_timeout(Duration::from_millis(50));
        MongoStore::connect(&config)
            .await
            .expect("client builds without contacting the server");
    }
}
