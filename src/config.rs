//! Configuration loading for libscout.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.libscout/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The tool runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, ScoutError};
use crate::fetch::DEFAULT_INDEX_URL;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Minimum valid timeout (a zero timeout would fail every request).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Main configuration struct for libscout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Package index endpoint, `{index_url}/{package}/json` per package.
    pub index_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Override for the state-file location.
    pub state_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            state_file: None,
        }
    }
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        let mut config = Self::load_user_config().unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Load user config from `~/.libscout/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = libscout_home()?;
        let config_path = home.join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| ScoutError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| ScoutError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("LIBSCOUT_INDEX_URL") {
            if val.is_empty() {
                eprintln!(
                    "Warning: LIBSCOUT_INDEX_URL is empty. Using '{}'.",
                    self.index_url
                );
            } else {
                self.index_url = val;
            }
        }

        if let Ok(val) = env::var("LIBSCOUT_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(n) if n >= MIN_TIMEOUT_SECS => self.timeout_secs = n,
                Ok(n) => eprintln!(
                    "Warning: Invalid LIBSCOUT_TIMEOUT_SECS value '{}'. \
                    Must be >= {}. Using default '{}'.",
                    n, MIN_TIMEOUT_SECS, self.timeout_secs
                ),
                Err(_) => eprintln!(
                    "Warning: Invalid LIBSCOUT_TIMEOUT_SECS value '{}'. \
                    Expected a positive integer. Using default '{}'.",
                    val, self.timeout_secs
                ),
            }
        }

        if let Ok(val) = env::var("LIBSCOUT_STATE_FILE") {
            if val.is_empty() {
                eprintln!("Warning: LIBSCOUT_STATE_FILE is empty, ignoring");
            } else {
                self.state_file = Some(PathBuf::from(val));
            }
        }
    }

    /// The per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the state-file path: the configured override, else
    /// `~/.libscout/state.json`.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_file
            .clone()
            .or_else(|| Some(libscout_home()?.join("state.json")))
    }
}

/// Get the libscout home directory.
///
/// Checks the `LIBSCOUT_HOME` environment variable first, then falls back
/// to `~/.libscout`. An empty `LIBSCOUT_HOME` is ignored with a warning.
pub fn libscout_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("LIBSCOUT_HOME") {
        if home.is_empty() {
            tracing::warn!("LIBSCOUT_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".libscout"))
}
