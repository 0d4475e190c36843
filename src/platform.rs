//! Platform Identification
//!
//! Canonical definition of the OS identifiers used for command template
//! selection. Detection happens once at startup; everything downstream
//! receives the detected value.

use serde::{Deserialize, Serialize};

/// Host platform classification used to pick command templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OsId {
    /// Linux (also the designated template fallback)
    #[default]
    Linux,
    /// macOS
    Darwin,
    /// Windows
    Windows,
}

impl OsId {
    /// Get a string representation of the platform identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            OsId::Linux => "linux",
            OsId::Darwin => "darwin",
            OsId::Windows => "windows",
        }
    }

    /// Get platform identifier from string (case-insensitive)
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Some(OsId::Linux),
            "darwin" | "macos" => Some(OsId::Darwin),
            "windows" => Some(OsId::Windows),
            _ => None,
        }
    }

    /// Classify the running host
    ///
    /// Unrecognized targets classify as Linux so template selection still
    /// has a populated fallback to land on.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => OsId::Linux,
            "macos" => OsId::Darwin,
            "windows" => OsId::Windows,
            other => {
                debug!("Unrecognized platform '{}', classifying as linux", other);
                OsId::Linux
            }
        }
    }

    /// Whether this platform uses the Windows command shell
    pub fn is_windows(&self) -> bool {
        matches!(self, OsId::Windows)
    }
}
