//! Server settings loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `TICKETS_*` environment variables and an
//! optional configuration file. Absent values fall back to the defaults
//! exposed by the accessors below.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_MAX_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the HTTP server and ticket store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TICKETS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Route `strikeOff` requests to their policy.
    ///
    /// Read from the environment or a configuration file, never the CLI.
    #[ortho_config(default = false, skip_cli)]
    pub strike_off_enabled: bool,
    /// Apply embedded migrations at start-up. Not a CLI flag either.
    #[ortho_config(skip_cli)]
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Configured pool size, falling back to the pool default.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }

    /// Whether to run migrations; defaults to on when a database is set.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.database_url().is_some() && self.run_migrations.unwrap_or(true)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Unit tests for server settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 5] = [
        "TICKETS_BIND_ADDR",
        "TICKETS_DATABASE_URL",
        "TICKETS_POOL_MAX_SIZE",
        "TICKETS_STRIKE_OFF_ENABLED",
        "TICKETS_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("ticketing")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.pool_max_size(), DEFAULT_MAX_SIZE);
        assert!(!settings.strike_off_enabled);
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TICKETS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "TICKETS_DATABASE_URL",
                Some("postgres://localhost/tickets".to_owned()),
            ),
            ("TICKETS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("TICKETS_STRIKE_OFF_ENABLED", Some("true".to_owned())),
            ("TICKETS_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/tickets"));
        assert_eq!(settings.pool_max_size(), 4);
        assert!(settings.strike_off_enabled);
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn migrations_default_on_with_database() {
        let _guard = lock_env([
            ("TICKETS_BIND_ADDR", None::<String>),
            (
                "TICKETS_DATABASE_URL",
                Some("postgres://localhost/tickets".to_owned()),
            ),
            ("TICKETS_POOL_MAX_SIZE", None),
            ("TICKETS_STRIKE_OFF_ENABLED", None),
            ("TICKETS_RUN_MIGRATIONS", None),
        ]);

        assert!(load_from_empty_args().run_migrations());
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    #[case(None, false)]
    fn strike_off_flag_follows_environment(#[case] raw: Option<&str>, #[case] expected: bool) {
        let _guard = lock_env([
            ("TICKETS_DATABASE_URL", None::<String>),
            ("TICKETS_STRIKE_OFF_ENABLED", raw.map(str::to_owned)),
            ("TICKETS_RUN_MIGRATIONS", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.strike_off_enabled, expected);
        assert_eq!(settings.run_migrations, None);
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let _guard = lock_env([("TICKETS_BIND_ADDR", Some("not-an-address".to_owned()))]);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("invalid address");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
