//! Configuration management for the console binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use concierge_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default log filter when `CONCIERGE_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,concierge=debug";

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable did not parse
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// A flag was neither true nor false
    #[error("{key} must be `true` or `false`, got `{value}`")]
    InvalidFlag {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// The snapshot/action broadcast needs room for at least one message
    #[error("CONCIERGE_BROADCAST_CAPACITY must be at least 1")]
    ZeroCapacity,
}

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// `tracing` filter directive
    pub log_filter: String,
    /// Capacity of the Store's action broadcast
    pub broadcast_capacity: usize,
    /// Graceful shutdown timeout
    pub shutdown_timeout: Duration,
    /// Install the Prometheus recorder and print metrics on exit
    pub metrics: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            broadcast_capacity: store.broadcast_capacity,
            shutdown_timeout: store.default_shutdown_timeout,
            metrics: false,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_filter = lookup("CONCIERGE_LOG")
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let broadcast_capacity = number(&lookup, "CONCIERGE_BROADCAST_CAPACITY")?
            .map_or(Ok(defaults.broadcast_capacity), |capacity| {
                usize::try_from(capacity)
                    .ok()
                    .filter(|capacity| *capacity > 0)
                    .ok_or(ConfigError::ZeroCapacity)
            })?;

        let shutdown_timeout = number(&lookup, "CONCIERGE_SHUTDOWN_TIMEOUT_SECS")?
            .map_or(defaults.shutdown_timeout, Duration::from_secs);

        let metrics = match lookup("CONCIERGE_METRICS") {
            None => defaults.metrics,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        key: "CONCIERGE_METRICS",
                        value: raw,
                    })
                },
            },
        };

        Ok(Self {
            log_filter,
            broadcast_capacity,
            shutdown_timeout,
            metrics,
        })
    }

    /// Runtime settings for the Store
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.broadcast_capacity, self.shutdown_timeout)
    }
}

fn number(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<u64>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { key, value: raw.clone() })
        })
        .transpose()
}
