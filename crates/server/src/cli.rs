//! Command-line flags.
//!
//! Every flag is optional; when present it overrides the value loaded from
//! the environment or config file.

use std::path::PathBuf;

use clap::Parser;
use snippety_core::{AppConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "snippety", version, about = "Create and share short-lived text snippets")]
pub struct Cli {
    /// HTTP network address (host:port).
    #[arg(long)]
    pub addr: Option<String>,

    /// SQLite database path.
    #[arg(long, visible_alias = "dsn")]
    pub db_path: Option<PathBuf>,

    /// Directory containing `html/` templates and `static/` assets.
    #[arg(long)]
    pub ui_dir: Option<PathBuf>,

    /// Default log filter, used when RUST_LOG is not set.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines instead of text.
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Load layered configuration, apply flag overrides, then validate.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::load()?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.addr {
            config.addr = addr.clone();
        }
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        if let Some(ui_dir) = &self.ui_dir {
            config.ui_dir = ui_dir.clone();
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["snippety", "--addr", "0.0.0.0:9000", "--dsn", "/tmp/s.sqlite"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/s.sqlite"));
        assert_eq!(config.ui_dir, PathBuf::from("./ui"));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["snippety"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.addr, AppConfig::default().addr);
        assert!(!cli.json_logs);
    }
}
