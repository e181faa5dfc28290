//! # Configuration
//!
//! Roster reads a small TOML file (default `roster.toml`) with three sections:
//!
//! - [`StoreConfig`] - where the character file lives
//! - [`LoggingConfig`] - default log level and optional log file
//! - [`MenuConfig`] - interactive menu behaviour
//!
//! ```toml
//! [store]
//! path = "input.csv"
//!
//! [logging]
//! level = "warn"
//! file = "roster.log"
//!
//! [menu]
//! pause_after_action = false
//! ```
//!
//! Every section and key is optional. A missing file means defaults, and a
//! `--store` flag on the command line overrides `store.path`.
//!
//! ```rust,no_run
//! use roster::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("roster.toml").await?;
//!     println!("Store: {}", config.store.path);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the comma-separated character file.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "input.csv".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when no `-v` is given: error, warn, info, debug, trace or off.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append log lines to this file as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`, falling back to `Warn` for anything unrecognised.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level
            .trim()
            .parse()
            .unwrap_or(log::LevelFilter::Warn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Wait for Enter after each action before showing the menu again.
    #[serde(default)]
    pub pause_after_action: bool,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        Self::from_toml(&content).map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))
    }

    /// Load configuration, using defaults when the file does not exist.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        match fs::metadata(path).await {
            Ok(_) => Self::load(path).await,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("config file {} not found; using defaults", path);
                Ok(Config::default())
            }
            Err(e) => Err(anyhow!("Failed to read config file {}: {}", path, e)),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Create a default configuration file. Refuses to overwrite an existing one.
    pub async fn create_default(path: &str) -> Result<()> {
        if Path::new(path).exists() {
            return Err(anyhow!("Config file {} already exists", path));
        }
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Apply a command-line store path over the configured one.
    pub fn with_store_override(mut self, store: Option<String>) -> Self {
        if let Some(path) = store {
            self.store.path = path;
        }
        self
    }
}
