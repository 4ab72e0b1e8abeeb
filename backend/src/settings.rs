//! Service configuration.
//!
//! Core settings (`PORT`, `HOST`, `DATABASE_URL`, `PUBLIC_DIR`) are read
//! through [`mockable::Env`] so parsing can be tested without touching the
//! process environment. Store tuning (`STORE_*`) is loaded with OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const PORT_ENV: &str = "PORT";
const HOST_ENV: &str = "HOST";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const PUBLIC_DIR_ENV: &str = "PUBLIC_DIR";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PUBLIC_DIR: &str = "public";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Errors raised while reading service configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Core service settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub public_dir: PathBuf,
}

impl std::fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &"<redacted>")
            .field("public_dir", &self.public_dir)
            .finish()
    }
}

/// Read core settings from `env`.
///
/// # Examples
///
/// ```rust
/// use contact_form::settings::service_settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "DATABASE_URL" => Some("postgres://localhost/contact".to_owned()),
///     "PORT" => Some("8080".to_owned()),
///     _ => None,
/// });
///
/// let settings = service_settings_from_env(&env).expect("valid settings");
/// assert_eq!(settings.bind_addr.port(), 8080);
/// ```
pub fn service_settings_from_env<E: Env>(env: &E) -> Result<ServiceSettings, SettingsError> {
    let port = match non_blank(env, PORT_ENV) {
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| SettingsError::InvalidEnv {
                name: PORT_ENV,
                value,
                expected: "a TCP port between 0 and 65535",
            })?,
        None => DEFAULT_PORT,
    };
    let host = match non_blank(env, HOST_ENV) {
        Some(value) => value
            .parse::<IpAddr>()
            .map_err(|_| SettingsError::InvalidEnv {
                name: HOST_ENV,
                value,
                expected: "an IPv4 or IPv6 address",
            })?,
        None => DEFAULT_HOST,
    };
    let database_url = non_blank(env, DATABASE_URL_ENV).ok_or(SettingsError::MissingEnv {
        name: DATABASE_URL_ENV,
    })?;
    let public_dir = non_blank(env, PUBLIC_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

    Ok(ServiceSettings {
        bind_addr: SocketAddr::new(host, port),
        database_url,
        public_dir,
    })
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Data store tuning loaded via OrthoConfig (`STORE_` prefix).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STORE")]
pub struct StoreSettings {
    /// Maximum pooled connections.
    pub max_connections: Option<u32>,
    /// Seconds a request waits for a pooled connection.
    pub connect_timeout_secs: Option<u64>,
    /// Skip the embedded migrations at startup and only probe the store.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl StoreSettings {
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_only_database_url_is_set() {
        let env = mock_env(&[("DATABASE_URL", "postgres://db/contact")]);

        let settings = service_settings_from_env(&env).expect("settings load");

        assert_eq!(settings.bind_addr, "0.0.0.0:3000".parse().expect("addr"));
        assert_eq!(settings.database_url, "postgres://db/contact");
        assert_eq!(settings.public_dir, PathBuf::from("public"));
    }

    #[rstest]
    fn overrides_are_respected() {
        let env = mock_env(&[
            ("DATABASE_URL", "postgres://db/contact"),
            ("PORT", " 8081 "),
            ("HOST", "127.0.0.1"),
            ("PUBLIC_DIR", "/srv/public"),
        ]);

        let settings = service_settings_from_env(&env).expect("settings load");

        assert_eq!(settings.bind_addr, "127.0.0.1:8081".parse().expect("addr"));
        assert_eq!(settings.public_dir, PathBuf::from("/srv/public"));
    }

    #[rstest]
    #[case(&[], SettingsError::MissingEnv { name: "DATABASE_URL" })]
    #[case(&[("DATABASE_URL", "  ")], SettingsError::MissingEnv { name: "DATABASE_URL" })]
    #[case(
        &[("DATABASE_URL", "postgres://db"), ("PORT", "http")],
        SettingsError::InvalidEnv {
            name: "PORT",
            value: "http".to_owned(),
            expected: "a TCP port between 0 and 65535",
        }
    )]
    #[case(
        &[("DATABASE_URL", "postgres://db"), ("HOST", "localhost")],
        SettingsError::InvalidEnv {
            name: "HOST",
            value: "localhost".to_owned(),
            expected: "an IPv4 or IPv6 address",
        }
    )]
    fn invalid_configuration_is_rejected(
        #[case] vars: &[(&str, &str)],
        #[case] expected: SettingsError,
    ) {
        let env = mock_env(vars);

        assert_eq!(service_settings_from_env(&env), Err(expected));
    }

    #[rstest]
    fn debug_output_hides_database_url() {
        let env = mock_env(&[("DATABASE_URL", "postgres://admin:hunter2@db/contact")]);
        let settings = service_settings_from_env(&env).expect("settings load");

        assert!(!format!("{settings:?}").contains("hunter2"));
    }

    fn load_store_settings() -> StoreSettings {
        StoreSettings::load_from_iter([OsString::from("contact-form")]).expect("config should load")
    }

    #[rstest]
    fn store_defaults_are_used_when_missing() {
        let _guard = lock_env([
            ("STORE_MAX_CONNECTIONS", None::<String>),
            ("STORE_CONNECT_TIMEOUT_SECS", None::<String>),
            ("STORE_SKIP_MIGRATIONS", None::<String>),
        ]);

        let settings = load_store_settings();
        assert_eq!(settings.max_connections(), 10);
        assert_eq!(settings.connect_timeout(), Duration::from_secs(5));
        assert!(!settings.skip_migrations);
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn store_environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STORE_MAX_CONNECTIONS", Some("3".to_owned())),
            ("STORE_CONNECT_TIMEOUT_SECS", Some("1".to_owned())),
            ("STORE_SKIP_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_store_settings();
        assert_eq!(settings.max_connections(), 3);
        assert_eq!(settings.connect_timeout(), Duration::from_secs(1));
        assert!(!settings.run_migrations());
    }
}
