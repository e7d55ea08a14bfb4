//! # Unified Configuration System
//!
//! Configuration for logging, asset resolution and the event bus, loadable
//! from TOML or RON through the [`Config`] trait.
//!
//! Every section is `#[serde(default)]`, so a config file only needs to name
//! the values it changes.

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// # Engine Configuration
///
/// Core runtime behavior: logging and debug features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace` or `off`)
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        log::LevelFilter::from_str(&self.log_level)
            .map(|_| ())
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// Where texture paths named in scene files are resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets
    pub assets_dir: String,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: "resources".to_string(),
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Resolve an asset path against the assets directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.assets_dir).join(path)
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Event Bus Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Warn once the queued channel grows past this many events (0 disables)
    pub warn_queue_len: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self { warn_queue_len: 1024 }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all runtime subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
    /// Event bus configuration
    pub events: EventBusConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.assets.assets_dir.is_empty() {
            return Err(ConfigError::Invalid("assets_dir cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
