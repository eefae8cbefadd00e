//! Server settings loaded via OrthoConfig and the configuration built from them.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use profile_backend::outbound::mongo::MongoConfig;

/// Raw settings, layered from CLI arguments, `PROFILE_*` variables and files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILE")]
pub struct ServerSettings {
    /// Port the HTTP listener binds on all interfaces.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Identity provider domain serving `/userinfo`.
    pub auth_domain: Option<String>,
    /// MongoDB host, optionally with `:port`.
    pub db_host: Option<String>,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    /// Connection and server selection timeout.
    #[ortho_config(default = 10)]
    pub db_connection_timeout_secs: u64,
}

/// A required setting was absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required setting {env} ({key})")]
pub struct MissingSetting {
    key: &'static str,
    env: &'static str,
}

fn required(
    value: Option<String>,
    key: &'static str,
    env: &'static str,
) -> Result<String, MissingSetting> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(MissingSetting { key, env })
}

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) auth_domain: String,
    pub(crate) mongo: MongoConfig,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl TryFrom<ServerSettings> for ServerConfig {
    type Error = MissingSetting;

    fn try_from(settings: ServerSettings) -> Result<Self, Self::Error> {
        let auth_domain = required(settings.auth_domain, "auth_domain", "PROFILE_AUTH_DOMAIN")?;
        let db_host = required(settings.db_host, "db_host", "PROFILE_DB_HOST")?;
        let db_name = required(settings.db_name, "db_name", "PROFILE_DB_NAME")?;

        let mut mongo = MongoConfig::new(db_host, db_name).with_connection_timeout(
            Duration::from_secs(settings.db_connection_timeout_secs),
        );
        if let Some(username) = settings.db_username.filter(|name| !name.is_empty()) {
            mongo = mongo.with_credentials(username, settings.db_password.unwrap_or_default());
        }

        Ok(Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port)),
            auth_domain,
            mongo,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 7] = [
        "PROFILE_PORT",
        "PROFILE_AUTH_DOMAIN",
        "PROFILE_DB_HOST",
        "PROFILE_DB_USERNAME",
        "PROFILE_DB_PASSWORD",
        "PROFILE_DB_NAME",
        "PROFILE_DB_CONNECTION_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("profile-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        KEYS.iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| (*value).to_owned());
                (*key, value)
            })
            .collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.db_connection_timeout_secs, 10);
        assert!(settings.auth_domain.is_none());
        assert!(settings.db_host.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("PROFILE_PORT", "9090"),
            ("PROFILE_AUTH_DOMAIN", "id.example.org"),
            ("PROFILE_DB_HOST", "db.internal:27017"),
            ("PROFILE_DB_USERNAME", "svc"),
            ("PROFILE_DB_PASSWORD", "secret"),
            ("PROFILE_DB_NAME", "profiles"),
            ("PROFILE_DB_CONNECTION_TIMEOUT_SECS", "3"),
        ]));

        let config = ServerConfig::try_from(load_from_empty_args()).expect("complete settings");
        assert_eq!(config.bind_addr().port(), 9090);
        assert_eq!(config.auth_domain, "id.example.org");
        assert_eq!(config.mongo.uri(), "mongodb://db.internal:27017");
        let credential = config.mongo.credential().expect("credentials set");
        assert_eq!(credential.username.as_deref(), Some("svc"));
        assert_eq!(credential.password.as_deref(), Some("secret"));
        assert_eq!(config.mongo.database(), "profiles");
    }

    #[rstest]
    #[case(&[("PROFILE_DB_HOST", "db"), ("PROFILE_DB_NAME", "profiles")], "PROFILE_AUTH_DOMAIN")]
    #[case(&[("PROFILE_AUTH_DOMAIN", "id"), ("PROFILE_DB_NAME", "profiles")], "PROFILE_DB_HOST")]
    #[case(&[("PROFILE_AUTH_DOMAIN", "id"), ("PROFILE_DB_HOST", "db")], "PROFILE_DB_NAME")]
    #[case(&[("PROFILE_AUTH_DOMAIN", " "), ("PROFILE_DB_HOST", "db"), ("PROFILE_DB_NAME", "p")], "PROFILE_AUTH_DOMAIN")]
    fn missing_required_setting_is_reported(
        #[case] overrides: &[(&str, &str)],
        #[case] expected_env: &str,
    ) {
        let _guard = lock_env(env_with(overrides));

        let err = ServerConfig::try_from(load_from_empty_args()).expect_err("incomplete settings");
        assert!(err.to_string().contains(expected_env), "{err}");
    }

    #[rstest]
    fn password_with_reserved_characters_is_kept_verbatim() {
        let _guard = lock_env(env_with(&[
            ("PROFILE_AUTH_DOMAIN", "id.example.org"),
            ("PROFILE_DB_HOST", "db.internal"),
            ("PROFILE_DB_NAME", "profiles"),
            ("PROFILE_DB_USERNAME", "svc"),
            ("PROFILE_DB_PASSWORD", "p@ss/word"),
        ]));

        let config = ServerConfig::try_from(load_from_empty_args()).expect("complete settings");
        assert_eq!(config.mongo.uri(), "mongodb://db.internal");
        let credential = config.mongo.credential().expect("credentials set");
        assert_eq!(credential.password.as_deref(), Some("p@ss/word"));
    }

    #[rstest]
    fn credentials_are_omitted_without_username() {
        let _guard = lock_env(env_with(&[
            ("PROFILE_AUTH_DOMAIN", "id.example.org"),
            ("PROFILE_DB_HOST", "localhost"),
            ("PROFILE_DB_NAME", "profiles"),
            ("PROFILE_DB_PASSWORD", "ignored"),
        ]));

        let config = ServerConfig::try_from(load_from_empty_args()).expect("complete settings");
        assert_eq!(config.mongo.uri(), "mongodb://localhost");
        assert!(config.mongo.credential().is_none());
    }
}
