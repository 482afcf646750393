// SPDX-License-Identifier: Apache-2.0

//! Configuration management for SecLab.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. `PORT` environment variable (port only)
//! 2. Environment variables (prefix: `SECLAB_`)
//! 3. `./seclab.toml` in the working directory
//! 4. Config file: `~/.config/seclab/config.toml`
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Serve downloads from another directory
//! SECLAB_DOWNLOADS__DIR=/srv/files cargo run -p seclab-server
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::LabError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Download directory settings.
    pub downloads: DownloadsConfig,
    /// Default account seeding.
    pub seed: SeedConfig,
}

/// HTTP listener settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_seconds: u64,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3009,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8080".to_string(),
            ],
            request_timeout_seconds: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Database settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("database").join("userapp.db"),
        }
    }
}

/// Download directory settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DownloadsConfig {
    /// Directory files are served from.
    pub dir: PathBuf,
    /// Extensions a requested file may carry.
    pub allowed_extensions: Vec<String>,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public").join("downloads"),
            allowed_extensions: [".txt", ".pdf", ".jpg", ".png", ".doc"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Default account seeding.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Create the well-known admin and regular accounts at startup.
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Returns the SecLab configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/seclab`. Falls back to the working
/// directory when no home directory can be determined (containers).
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("seclab");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("seclab")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config files (if they exist) and environment variables.
/// Environment variables use the prefix `SECLAB_` and double underscore
/// for nested keys (e.g., `SECLAB_SERVER__PORT`). A bare `PORT` variable
/// overrides the port last, matching common container platforms.
///
/// # Errors
///
/// Returns `LabError::Config` if a config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, LabError> {
    let config_path = config_file_path();
    let port_override = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok());

    let config = Config::builder()
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        .add_source(File::with_name("seclab").required(false))
        .add_source(
            Environment::with_prefix("SECLAB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("server.port", port_override.map(i64::from))?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
