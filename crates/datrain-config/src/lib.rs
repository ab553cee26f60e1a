//! # datrain-config
//!
//! Configuration management for DatRain OneDrive sync.
//!
//! Loads configuration from:
//! 1. `~/.datrain/config.toml` (global)
//! 2. `.datrain/config.toml` (project-local, overrides global)
//! 3. Environment variables (highest priority)

pub mod logging;
pub mod path;
pub mod testing;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env var overriding `cache.source_dir`
pub const ENV_CACHE_SOURCE: &str = "DATRAIN_CACHE_SOURCE";
/// Env var carrying a tracing filter directive
pub const ENV_LOG: &str = "DATRAIN_LOG";

/// Default directory scanned by `onedrive-sync cache`
pub const DEFAULT_CACHE_SOURCE: &str = "./cache_to_onedrive";

/// Project-local config file, relative to the working directory
pub const PROJECT_CONFIG_PATH: &str = ".datrain/config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable {var} not set")]
    MissingEnv { var: &'static str },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load config from standard locations
    pub fn load() -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        let mut config = Self::load_from(global.as_deref(), Path::new(PROJECT_CONFIG_PATH))?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load the file layers only: global first, then project on top.
    /// Missing files are skipped. Any key the project file sets wins,
    /// even when it repeats the built-in default.
    pub fn load_from(global: Option<&Path>, project: &Path) -> Result<Self, ConfigError> {
        let mut merged = toml::Value::Table(toml::map::Map::new());

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("Loading global config from {:?}", global_path);
                let contents = std::fs::read_to_string(global_path)?;
                merge_values(&mut merged, contents.parse::<toml::Value>()?);
            }
        }

        if project.exists() {
            debug!("Loading project config from {:?}", project);
            let contents = std::fs::read_to_string(project)?;
            merge_values(&mut merged, contents.parse::<toml::Value>()?);
        }

        Ok(merged.try_into::<Config>()?)
    }

    /// Parse a config document; absent fields take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Global config path: ~/.datrain/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".datrain/config.toml"))
    }

    /// Apply environment variable overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_CACHE_SOURCE).filter(|s| !s.is_empty()) {
            self.cache.source_dir = PathBuf::from(source);
        }
    }

    /// Generate default config TOML string
    pub fn default_toml() -> String {
        Config::default().to_toml()
    }

    pub fn to_toml(&self) -> String {
        // Plain structs of strings and paths always serialize.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Overlay `top` onto `base`: tables merge key by key, anything else replaces.
fn merge_values(base: &mut toml::Value, top: toml::Value) {
    match (base, top) {
        (toml::Value::Table(base), toml::Value::Table(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

/// Cache copy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory whose top-level files are copied into the OneDrive folder
    pub source_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_CACHE_SOURCE),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// error, warn, info, debug or trace
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
