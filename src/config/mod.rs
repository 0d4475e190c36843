//! Application Configuration
//!
//! User-tunable settings for the resolver, the history log, and the table
//! file locations. Loaded once at startup; everything downstream receives
//! the values, nothing reads configuration globally.

pub mod loader;

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};

use crate::history::{HistoryLog, MAX_HISTORY_ENTRIES};
use crate::similarity::{DEFAULT_THRESHOLD, MAX_SCORE};
use crate::tables::default_table_dir;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Resolver configuration
    pub resolver: ResolverConfig,

    /// History configuration
    pub history: HistoryConfig,

    /// Table file locations
    pub tables: TablesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            history: HistoryConfig::default(),
            tables: TablesConfig::default(),
        }
    }
}

/// Resolver-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Fuzzy match acceptance cutoff on the 0..=100 scale
    pub fuzzy_threshold: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// History-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Cap on the in-memory history window
    pub max_entries: usize,

    /// History file override
    pub file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_HISTORY_ENTRIES,
            file: None,
        }
    }
}

/// Table file location overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Pattern table file override
    pub patterns_file: Option<PathBuf>,

    /// Command table file override
    pub commands_file: Option<PathBuf>,
}

impl AppConfig {
    /// Check values for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.fuzzy_threshold > MAX_SCORE {
            return Err(ConfigError::InvalidThreshold(self.resolver.fuzzy_threshold));
        }
        if self.history.max_entries == 0 {
            return Err(ConfigError::InvalidHistorySize(self.history.max_entries));
        }
        Ok(())
    }

    /// Resolved location of the pattern table file
    pub fn patterns_path(&self) -> PathBuf {
        self.tables
            .patterns_file
            .clone()
            .unwrap_or_else(|| default_table_dir().join("patterns.json"))
    }

    /// Resolved location of the command table file
    pub fn commands_path(&self) -> PathBuf {
        self.tables
            .commands_file
            .clone()
            .unwrap_or_else(|| default_table_dir().join("commands.json"))
    }

    /// Resolved location of the history file
    pub fn history_path(&self) -> PathBuf {
        self.history
            .file
            .clone()
            .unwrap_or_else(HistoryLog::default_path)
    }
}

/// Configuration value errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid fuzzy threshold: {0} (must be between 0 and 100)")]
    InvalidThreshold(u32),

    #[error("Invalid history size: {0} (must be at least 1)")]
    InvalidHistorySize(usize),
}
