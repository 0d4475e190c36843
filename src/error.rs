//! Error types and Result aliases for incant

use std::fmt;
use std::path::PathBuf;

/// Result type alias for incant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for incant
#[derive(Debug)]
pub enum Error {
    // === Execution errors ===
    /// Failed to spawn the platform shell
    SpawnFailed {
        command: String,
        reason: String,
    },

    /// Nothing to execute (empty command line or an unresolved action)
    EmptyCommand,

    // === Builtin operation errors ===
    /// A builtin operation reported a failure
    BuiltinFailed {
        operation: String,
        reason: String,
    },

    /// A builtin operation was given arguments it cannot use
    InvalidArgument {
        operation: String,
        reason: String,
    },

    // === Table errors ===
    /// Failed to read or parse a table file
    TableLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Table content violates a structural requirement
    TableInvalid {
        path: PathBuf,
        reason: String,
    },

    // === History errors ===
    /// Failed to load the history file
    HistoryLoadFailed {
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors (kept for compatibility) ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Execution errors
            Error::SpawnFailed { command, reason } => {
                write!(f, "Failed to spawn shell for '{}': {}", command, reason)
            }
            Error::EmptyCommand => {
                write!(f, "Command cannot be empty")
            }

            // Builtin operation errors
            Error::BuiltinFailed { operation, reason } => {
                write!(f, "Builtin '{}' failed: {}", operation, reason)
            }
            Error::InvalidArgument { operation, reason } => {
                write!(f, "Invalid argument to builtin '{}': {}", operation, reason)
            }

            // Table errors
            Error::TableLoadFailed { path, reason } => {
                write!(f, "Failed to load table from '{}': {}", path.display(), reason)
            }
            Error::TableInvalid { path, reason } => {
                write!(f, "Invalid table '{}': {}", path.display(), reason)
            }

            // History errors
            Error::HistoryLoadFailed { path, reason } => {
                write!(f, "Failed to load history from '{}': {}", path.display(), reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
