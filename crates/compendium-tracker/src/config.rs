//! Configuration for progression trackers
//!
//! Controls the terminal-advance policy and how progress is restored and saved.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tracker configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// What `apply_advance` does at the last tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalAdvancePolicy {
    /// Return `TrackerError::TerminalState`
    Reject,

    /// Leave the tracker untouched and report the current level
    Ignore,
}

/// Configuration shared by every tracker in a registry
///
/// # Examples
///
/// ```
/// use compendium_tracker::{TerminalAdvancePolicy, TrackerConfig};
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.terminal_advance, TerminalAdvancePolicy::Reject);
///
/// let config = TrackerConfig::lenient();
/// assert_eq!(config.terminal_advance, TerminalAdvancePolicy::Ignore);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Policy for advancing past the last tier
    /// Default: reject
    pub terminal_advance: TerminalAdvancePolicy,

    /// Read the starting level from the progress store on initialization
    /// Default: true
    pub restore_progress: bool,

    /// Write the new level to the progress store after every advance
    /// Default: true
    pub persist_on_advance: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            terminal_advance: TerminalAdvancePolicy::Reject,
            restore_progress: true,
            persist_on_advance: true,
        }
    }
}

impl TrackerConfig {
    /// Lenient configuration: advancing at the last tier is a no-op
    pub fn lenient() -> Self {
        Self {
            terminal_advance: TerminalAdvancePolicy::Ignore,
            ..Self::default()
        }
    }

    /// Ephemeral configuration: nothing is read from or written to the store
    pub fn ephemeral() -> Self {
        Self {
            restore_progress: false,
            persist_on_advance: false,
            ..Self::default()
        }
    }

    /// Parse configuration from TOML text
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
