//! Process settings loaded via OrthoConfig.
//!
//! Sources are layered as defaults, configuration file, `USER_SERVICE_*`
//! environment variables and finally command-line flags.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings that could not be turned into a usable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; users are kept in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub max_connections: Option<u32>,
    /// Do not apply embedded migrations at start-up.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl ServerSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the configured value is
    /// not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, falling back to 10.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "USER_SERVICE_BIND_ADDR",
        "USER_SERVICE_DATABASE_URL",
        "USER_SERVICE_MAX_CONNECTIONS",
        "USER_SERVICE_SKIP_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid default")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(!settings.skip_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_SERVICE_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "USER_SERVICE_DATABASE_URL",
                Some("postgres://localhost/users".to_owned()),
            ),
            ("USER_SERVICE_MAX_CONNECTIONS", Some("4".to_owned())),
            ("USER_SERVICE_SKIP_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("valid addr"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("valid addr")
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/users"));
        assert_eq!(settings.max_connections(), 4);
        assert!(settings.skip_migrations);
    }

    #[rstest]
    fn command_line_flags_override_environment() {
        let _guard = lock_env([
            ("USER_SERVICE_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("USER_SERVICE_DATABASE_URL", None),
            ("USER_SERVICE_MAX_CONNECTIONS", None),
            ("USER_SERVICE_SKIP_MIGRATIONS", None),
        ]);

        let settings = ServerSettings::load_from_iter([
            OsString::from("user-service"),
            OsString::from("--bind-addr"),
            OsString::from("127.0.0.1:7070"),
        ])
        .expect("config should load");

        assert_eq!(
            settings.bind_addr().expect("valid addr"),
            "127.0.0.1:7070".parse::<SocketAddr>().expect("valid addr")
        );
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let _guard = lock_env([
            ("USER_SERVICE_BIND_ADDR", Some("not-an-addr".to_owned())),
            ("USER_SERVICE_DATABASE_URL", None),
            ("USER_SERVICE_MAX_CONNECTIONS", None),
            ("USER_SERVICE_SKIP_MIGRATIONS", None),
        ]);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("address rejected");

        assert!(matches!(err, SettingsError::InvalidBindAddr { .. }));
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let _guard = lock_env([
            ("USER_SERVICE_BIND_ADDR", None),
            ("USER_SERVICE_DATABASE_URL", Some("   ".to_owned())),
            ("USER_SERVICE_MAX_CONNECTIONS", None),
            ("USER_SERVICE_SKIP_MIGRATIONS", None),
        ]);

        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
