//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded and overridden.

use std::net::ToSocketAddrs;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `addr` does not resolve to a socket address
    /// - `db_path`, `ui_dir` or `log_level` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolves = self
            .bind_addr()
            .to_socket_addrs()
            .is_ok_and(|mut addrs| addrs.next().is_some());
        if !resolves {
            return Err(ConfigError::Invalid {
                field: "addr".into(),
                reason: format!("{:?} is not a socket address (expected host:port or :port)", self.addr),
            });
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "db_path".into(), reason: "must not be empty".into() });
        }

        if self.ui_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "ui_dir".into(), reason: "must not be empty".into() });
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "log_level".into(), reason: "must not be empty".into() });
        }

        if !self.html_dir().is_dir() {
            tracing::warn!(dir = %self.html_dir().display(), "template directory does not exist");
        }

        Ok(())
    }
}
