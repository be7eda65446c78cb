//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SNIPPETY_*)
//! 2. TOML config file (if SNIPPETY_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! Command-line flags are applied on top by the server binary.

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address: `host:port`, or `:port` for all interfaces.
    ///
    /// Set via SNIPPETY_ADDR environment variable.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Path to the SQLite database holding snippets.
    ///
    /// Set via SNIPPETY_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Root of the UI tree (`html/` templates and `static/` assets).
    ///
    /// Set via SNIPPETY_UI_DIR environment variable.
    #[serde(default = "default_ui_dir")]
    pub ui_dir: PathBuf,

    /// Default log filter when RUST_LOG is not set.
    ///
    /// Set via SNIPPETY_LOG_LEVEL environment variable.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_addr() -> String {
    "127.0.0.1:4000".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./snippety.sqlite")
}

fn default_ui_dir() -> PathBuf {
    PathBuf::from("./ui")
}

fn default_log_level() -> String {
    "debug".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            db_path: default_db_path(),
            ui_dir: default_ui_dir(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Address handed to the listener, with a bare `:port` bound on all interfaces.
    pub fn bind_addr(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }

    /// Directory holding `base.tmpl.html`, `partials/` and `pages/`.
    pub fn html_dir(&self) -> PathBuf {
        self.ui_dir.join("html")
    }

    /// Directory served under `/static`.
    pub fn static_dir(&self) -> PathBuf {
        self.ui_dir.join("static")
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SNIPPETY_`
    /// 2. TOML file from `SNIPPETY_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// The result is not validated here so that callers can apply their own
    /// overrides first and then call [`AppConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadFailed` if the configuration file or
    /// environment variables cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SNIPPETY_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("SNIPPETY_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.addr, "127.0.0.1:4000");
        assert_eq!(config.db_path, PathBuf::from("./snippety.sqlite"));
        assert_eq!(config.ui_dir, PathBuf::from("./ui"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig { addr: ":4000".into(), ..Default::default() };
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");

        let config = AppConfig { addr: "localhost:4000".into(), ..Default::default() };
        assert_eq!(config.bind_addr(), "localhost:4000");
    }

    #[test]
    fn test_ui_subdirectories() {
        let config = AppConfig { ui_dir: PathBuf::from("/srv/ui"), ..Default::default() };
        assert_eq!(config.html_dir(), PathBuf::from("/srv/ui/html"));
        assert_eq!(config.static_dir(), PathBuf::from("/srv/ui/static"));
    }

    #[test]
    fn test_layered_loading() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("snippety.toml", "addr = \"0.0.0.0:8080\"\nlog_level = \"info\"")?;
            jail.set_env("SNIPPETY_CONFIG_FILE", "snippety.toml");
            jail.set_env("SNIPPETY_LOG_LEVEL", "warn");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.addr, "0.0.0.0:8080");
            assert_eq!(config.log_level, "warn");
            assert_eq!(config.db_path, PathBuf::from("./snippety.sqlite"));
            Ok(())
        });
    }
}
