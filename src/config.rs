//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving the decoder and CLI
//! settings in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::ParseOptions;

/// Environment variable that overrides the config directory (used by tests and CI).
pub const CONFIG_DIR_ENV: &str = "KLE_KEYCAPS_CONFIG_DIR";

/// Log levels accepted in `[logging] level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Output preferences for the inspection commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Print JSON instead of text unless a command says otherwise
    #[serde(default)]
    pub json: bool,
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KleKeycaps/config.toml`
/// - macOS: `~/Library/Application Support/KleKeycaps/config.toml`
/// - Windows: `%APPDATA%\KleKeycaps\config.toml`
///
/// `KLE_KEYCAPS_CONFIG_DIR` replaces the directory when set.
///
/// # Example
///
/// ```toml
/// [parser]
/// rotation = "carried"
/// relaxed_syntax = true
///
/// [output]
/// json = false
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Decoder options
    #[serde(default)]
    pub parser: ParseOptions,
    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging preferences
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("KleKeycaps");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Saves configuration to a specific file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }
}
