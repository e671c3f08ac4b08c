//! Booking service configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default         |
//! |------------------------------|-----------------|
//! | `SHAREIT_DB_PATH`            | `./shareit.db`  |
//! | `SHAREIT_DB_MAX_CONNECTIONS` | `5`             |
//! | `SHAREIT_DEFAULT_PAGE_SIZE`  | `10`            |

use std::env;
use std::path::PathBuf;

use serde::Serialize;
use shareit_core::DEFAULT_PAGE_SIZE;
use shareit_db::DbConfig;

/// Booking service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// Page length used when a listing omits `size`
    pub default_page_size: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            database_path: PathBuf::from("./shareit.db"),
            max_connections: 5,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BookingConfig::default();

        let config = BookingConfig {
            database_path: lookup("SHAREIT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: match lookup("SHAREIT_DB_MAX_CONNECTIONS") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    ConfigError::InvalidValue("SHAREIT_DB_MAX_CONNECTIONS".to_string())
                })?,
                None => defaults.max_connections,
            },

            default_page_size: match lookup("SHAREIT_DEFAULT_PAGE_SIZE") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    ConfigError::InvalidValue("SHAREIT_DEFAULT_PAGE_SIZE".to_string())
                })?,
                None => defaults.default_page_size,
            },
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "SHAREIT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.default_page_size <= 0 {
            return Err(ConfigError::InvalidValue(
                "SHAREIT_DEFAULT_PAGE_SIZE".to_string(),
            ));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BookingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BookingConfig::default());
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn test_overrides() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("SHAREIT_DB_PATH", "/var/lib/shareit/bookings.db"),
            ("SHAREIT_DB_MAX_CONNECTIONS", "12"),
            ("SHAREIT_DEFAULT_PAGE_SIZE", " 25 "),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/shareit/bookings.db"));
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.db_config().max_connections, 12);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("SHAREIT_DB_MAX_CONNECTIONS", "lots"),
            ("SHAREIT_DB_MAX_CONNECTIONS", "0"),
            ("SHAREIT_DEFAULT_PAGE_SIZE", "0"),
            ("SHAREIT_DEFAULT_PAGE_SIZE", "-3"),
        ] {
            let err = BookingConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == key));
        }
    }
}
