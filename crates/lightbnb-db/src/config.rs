use std::fmt;

use tracing::warn;

use crate::{Error, Result};

pub const ENV_HOST: &str = "LIGHTBNB_DB_HOST";
pub const ENV_USER: &str = "LIGHTBNB_DB_USER";
pub const ENV_PASSWORD: &str = "LIGHTBNB_DB_PASSWORD";
pub const ENV_NAME: &str = "LIGHTBNB_DB_NAME";
pub const ENV_PORT: &str = "LIGHTBNB_DB_PORT";

/// Connection settings for the store.
///
/// The embedded engine only needs `database` (a file path, or `:memory:`).
/// The network settings are still accepted so deployments can keep one
/// environment file across engines.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: String,
    pub port: Option<u16>,
}

impl StoreConfig {
    pub const IN_MEMORY: &'static str = ":memory:";
    pub const DEFAULT_DATABASE: &'static str = "lightbnb.db";

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .map_err(|e| Error::Config(format!("{ENV_PORT}={raw:?}: {e}")))?,
            ),
            None => None,
        };

        Ok(Self {
            host: get(ENV_HOST),
            user: get(ENV_USER),
            password: get(ENV_PASSWORD),
            database: get(ENV_NAME).unwrap_or_else(|| Self::DEFAULT_DATABASE.to_string()),
            port,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            database: Self::IN_MEMORY.to_string(),
            ..Self::default()
        }
    }

    /// Settings that are set but have no meaning for an embedded file.
    pub fn ignored_settings(&self) -> Vec<&'static str> {
        [
            ("host", self.host.is_some()),
            ("user", self.user.is_some()),
            ("password", self.password.is_some()),
            ("port", self.port.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    pub(crate) fn warn_unsupported(&self) {
        let ignored = self.ignored_settings();
        if !ignored.is_empty() {
            warn!(
                "Embedded store ignores connection settings: {}",
                ignored.join(", ")
            );
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: None,
            password: None,
            database: Self::DEFAULT_DATABASE.to_string(),
            port: None,
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.database, "lightbnb.db");
    }

    #[test]
    fn reads_all_recognized_keys() {
        let config = StoreConfig::from_lookup(lookup(&[
            (ENV_HOST, "localhost"),
            (ENV_USER, "vagrant"),
            (ENV_PASSWORD, "123"),
            (ENV_NAME, "lightbnb"),
            (ENV_PORT, "5432"),
        ]))
        .unwrap();

        assert_eq!(config.host.as_deref(), Some("localhost"));
        assert_eq!(config.user.as_deref(), Some("vagrant"));
        assert_eq!(config.password.as_deref(), Some("123"));
        assert_eq!(config.database, "lightbnb");
        assert_eq!(config.port, Some(5432));
    }

    #[test]
    fn empty_values_are_unset() {
        let config = StoreConfig::from_lookup(lookup(&[(ENV_HOST, ""), (ENV_PORT, "  ")])).unwrap();
        assert_eq!(config.host, None);
        assert_eq!(config.port, None);
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = StoreConfig::from_lookup(lookup(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn network_settings_are_reported_as_ignored() {
        let config = StoreConfig {
            host: Some("localhost".into()),
            port: Some(5432),
            ..StoreConfig::in_memory()
        };
        assert_eq!(config.ignored_settings(), vec!["host", "port"]);
        assert!(StoreConfig::in_memory().ignored_settings().is_empty());
    }

    #[test]
    fn debug_hides_password() {
        let config = StoreConfig {
            password: Some("hunter2".into()),
            ..StoreConfig::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("hunter2"));
    }
}
