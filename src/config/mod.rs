//! Configuration for the yen-units CLI
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/yen-units/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Library users skip all of this and hand a `FormatterConfig` straight to
//! `UnitFormatter::new`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod formatter;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use formatter::{FileFormatter, FormatterSettings, UnitSetting};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the config file location
pub const ENV_CONFIG_PATH: &str = "YEN_UNITS_CONFIG";
pub const ENV_LOCALE: &str = "YEN_UNITS_LOCALE";
pub const ENV_CURRENCY_SUFFIX: &str = "YEN_UNITS_CURRENCY_SUFFIX";
pub const ENV_LOG_LEVEL: &str = "YEN_UNITS_LOG_LEVEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Formatter settings
    pub formatter: FormatterSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [formatter] section
    pub formatter: Option<FileFormatter>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: $YEN_UNITS_CONFIG or
    /// ~/.config/yen-units/config.toml
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|p| p.join(".config").join("yen-units").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists(path: &Path) -> Result<bool> {
        // Don't overwrite existing config
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }

        // Config::default().to_toml() is the single source of truth
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("writing config file {}", path.display()))?;
        Ok(true)
    }

    /// Build config from a file's contents (no environment applied)
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents).context("parsing config TOML")?;
        Self::from_file(file)
    }

    fn from_file(file: FileConfig) -> Result<Self> {
        Ok(Self {
            formatter: FormatterSettings::from_file(file.formatter),
            logging: LoggingConfig::from_file(file.logging)
                .context("invalid [logging] section")?,
        })
    }

    /// Load a config file; a missing file yields defaults.
    ///
    /// A file that exists but cannot be read or parsed is an error. A broken
    /// config should fail fast, not silently fall back to defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (env > file)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(ENV_LOCALE) {
            self.formatter.locale = locale;
        }
        if let Some(suffix) = lookup(ENV_CURRENCY_SUFFIX) {
            self.formatter.currency_suffix = suffix;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }
}
