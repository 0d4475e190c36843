//! Table File Loading
//!
//! JSON loading for the pattern and command tables. Policy: a missing or
//! malformed file yields an empty table plus a logged warning, never a
//! startup failure. First runs can seed the built-in defaults to disk so
//! users have something to edit.

use super::{CommandEntry, CommandTable, PatternTable};
use crate::error::{Error, Result};
use crate::resolver::normalize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Load-time shape of a command entry
///
/// Accepts the tagged object form and the bare-string shorthand; the
/// shorthand becomes the fallback template.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCommandEntry {
    Template(String),
    PerOs {
        linux: String,
        #[serde(default)]
        darwin: Option<String>,
        #[serde(default)]
        windows: Option<String>,
    },
}

/// Parse a pattern table document
///
/// Phrases are normalized as they enter the table. An empty phrase or an
/// empty key rejects the whole document.
pub fn read_patterns(path: &Path) -> Result<PatternTable> {
    let raw: BTreeMap<String, String> = read_document(path)?;

    let mut table = PatternTable::new();
    for (phrase, key) in &raw {
        if normalize(phrase).is_empty() {
            return Err(Error::TableInvalid {
                path: path.to_path_buf(),
                reason: format!("pattern '{}' normalizes to an empty phrase", phrase),
            });
        }
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::TableInvalid {
                path: path.to_path_buf(),
                reason: format!("pattern '{}' maps to an empty key", phrase),
            });
        }
        table.insert(phrase, key);
    }
    Ok(table)
}

/// Parse a command table document and normalize every entry into the
/// tagged form
pub fn read_commands(path: &Path) -> Result<CommandTable> {
    let raw: BTreeMap<String, RawCommandEntry> = read_document(path)?;

    let mut table = CommandTable::new();
    for (name, entry) in raw {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::TableInvalid {
                path: path.to_path_buf(),
                reason: "command with an empty name".to_string(),
            });
        }
        table.insert(name.clone(), normalize_entry(path, &name, entry)?);
    }
    Ok(table)
}

fn normalize_entry(path: &Path, name: &str, raw: RawCommandEntry) -> Result<CommandEntry> {
    let (linux, darwin, windows) = match raw {
        RawCommandEntry::Template(template) => (template, None, None),
        RawCommandEntry::PerOs {
            linux,
            darwin,
            windows,
        } => (linux, darwin, windows),
    };

    let check = |os: &str, template: String| -> Result<String> {
        let template = template.trim().to_string();
        if template.is_empty() {
            return Err(Error::TableInvalid {
                path: path.to_path_buf(),
                reason: format!("command '{}' has an empty {} template", name, os),
            });
        }
        Ok(template)
    };

    Ok(CommandEntry {
        linux: check("fallback", linux)?,
        darwin: darwin.map(|t| check("darwin", t)).transpose()?,
        windows: windows.map(|t| check("windows", t)).transpose()?,
    })
}

fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::TableLoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| Error::TableLoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load a pattern table, degrading to empty on any problem
pub fn load_patterns(path: &Path) -> PatternTable {
    if !path.exists() {
        warn!(
            "Pattern table '{}' not found, continuing with an empty table",
            path.display()
        );
        return PatternTable::new();
    }
    match read_patterns(path) {
        Ok(table) => {
            info!("Loaded {} patterns from '{}'", table.len(), path.display());
            table
        }
        Err(e) => {
            warn!("{}; continuing with an empty pattern table", e);
            PatternTable::new()
        }
    }
}

/// Load a command table, degrading to empty on any problem
pub fn load_commands(path: &Path) -> CommandTable {
    if !path.exists() {
        warn!(
            "Command table '{}' not found, continuing with an empty table",
            path.display()
        );
        return CommandTable::new();
    }
    match read_commands(path) {
        Ok(table) => {
            info!("Loaded {} commands from '{}'", table.len(), path.display());
            table
        }
        Err(e) => {
            warn!("{}; continuing with an empty command table", e);
            CommandTable::new()
        }
    }
}

/// Load a pattern table, seeding the defaults first when the file is absent
///
/// A failed seed write keeps the session on in-memory defaults. An
/// existing-but-malformed file is never overwritten; it degrades to empty
/// like `load_patterns`.
pub fn load_or_seed_patterns(path: &Path) -> PatternTable {
    if path.exists() {
        return load_patterns(path);
    }
    let defaults = PatternTable::defaults();
    match seed(path, &defaults) {
        Ok(()) => info!("Seeded default pattern table at '{}'", path.display()),
        Err(e) => warn!(
            "Could not seed '{}': {}; using built-in defaults for this session",
            path.display(),
            e
        ),
    }
    defaults
}

/// Load a command table, seeding the defaults first when the file is absent
pub fn load_or_seed_commands(path: &Path) -> CommandTable {
    if path.exists() {
        return load_commands(path);
    }
    let defaults = CommandTable::defaults();
    match seed(path, &defaults) {
        Ok(()) => info!("Seeded default command table at '{}'", path.display()),
        Err(e) => warn!(
            "Could not seed '{}': {}; using built-in defaults for this session",
            path.display(),
            e
        ),
    }
    defaults
}

fn seed<T: Serialize>(path: &Path, table: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content)?;
    Ok(())
}

/// Directory holding the table files
///
/// `INCANT_CONFIG_DIR` overrides; otherwise the user config directory,
/// then the home dotdir, then the current directory.
pub fn default_table_dir() -> PathBuf {
    if let Ok(dir) = env::var("INCANT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("incant");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".incant");
    }
    PathBuf::from(".")
}
