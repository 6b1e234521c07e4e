// SPDX-License-Identifier: Apache-2.0

//! Configuration management for repoharvest.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `REPOHARVEST_`)
//! 2. Config file: `~/.config/repoharvest/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Override the language filter via environment variable
//! REPOHARVEST_HARVEST__LANGUAGE=Rust repoharvest fetch
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::HarvestError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Harvest behavior settings.
    pub harvest: HarvestConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
}

/// Harvest behavior settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Primary language a repository must report to be kept.
    pub language: String,
    /// CSV file records are appended to.
    pub output_file: PathBuf,
    /// Append-only log of entity-level errors.
    pub error_log: PathBuf,
    /// Stop when the remote returns an empty page instead of polling.
    pub stop_on_empty: bool,
    /// Delay before re-polling after an empty page, in seconds.
    pub empty_page_delay_seconds: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            language: "C".to_string(),
            output_file: PathBuf::from("repos.csv"),
            error_log: PathBuf::from("errors.log"),
            stop_on_empty: false,
            empty_page_delay_seconds: 60,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_timeout_seconds: 10,
        }
    }
}

/// Returns the configuration directory.
///
/// - Linux: `~/.config/repoharvest`
/// - macOS: `~/Library/Application Support/repoharvest`
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repoharvest")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Loads the application configuration.
///
/// Merges the config file (if present) with `REPOHARVEST_`-prefixed
/// environment variables over built-in defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// an environment override has the wrong shape.
pub fn load_config() -> Result<AppConfig, HarvestError> {
    let settings = Config::builder()
        .add_source(File::from(config_file_path()).required(false))
        .add_source(Environment::with_prefix("REPOHARVEST").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.harvest.language, "C");
        assert_eq!(config.harvest.output_file, PathBuf::from("repos.csv"));
        assert_eq!(config.harvest.error_log, PathBuf::from("errors.log"));
        assert!(!config.harvest.stop_on_empty);
        assert_eq!(config.harvest.empty_page_delay_seconds, 60);
        assert_eq!(config.github.api_timeout_seconds, 10);
    }

    #[test]
    fn test_config_file_path_ends_with_toml() {
        let path = config_file_path();
        assert!(path.to_string_lossy().ends_with("repoharvest/config.toml"));
    }
}
