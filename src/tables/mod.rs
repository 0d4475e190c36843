//! Pattern and Command Tables
//!
//! The two user-editable lookup tables behind resolution. A `PatternTable`
//! maps natural-language phrases to canonical keys; a `CommandTable` maps
//! canonical command names to per-OS shell templates. Both are built once
//! at startup and treated as immutable afterwards.
//!
//! Storage is ordered (`BTreeMap`) so fuzzy matching walks candidates in a
//! deterministic order.

pub mod loader;

pub use loader::{
    default_table_dir, load_commands, load_or_seed_commands, load_or_seed_patterns, load_patterns,
    read_commands, read_patterns,
};

use crate::platform::OsId;
use crate::resolver::normalize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-OS shell templates for one command
///
/// The tagged form every entry is normalized into at load time. The linux
/// template doubles as the fallback and is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Fallback template, used when no OS-specific one exists
    pub linux: String,
    /// macOS-specific template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub darwin: Option<String>,
    /// Windows-specific template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<String>,
}

impl CommandEntry {
    /// Create an entry with only the fallback template
    pub fn fallback(template: impl Into<String>) -> Self {
        Self {
            linux: template.into(),
            darwin: None,
            windows: None,
        }
    }

    /// Add a macOS-specific template
    pub fn with_darwin(mut self, template: impl Into<String>) -> Self {
        self.darwin = Some(template.into());
        self
    }

    /// Add a Windows-specific template
    pub fn with_windows(mut self, template: impl Into<String>) -> Self {
        self.windows = Some(template.into());
        self
    }

    /// Pick the template for a platform, falling back to linux
    ///
    /// Total: the fallback is mandatory, so there is always a template.
    pub fn template_for(&self, os: OsId) -> &str {
        match os {
            OsId::Linux => &self.linux,
            OsId::Darwin => self.darwin.as_deref().unwrap_or(&self.linux),
            OsId::Windows => self.windows.as_deref().unwrap_or(&self.linux),
        }
    }
}

/// Phrase -> canonical key lookup table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternTable {
    phrases: BTreeMap<String, String>,
}

impl PatternTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a phrase mapping, normalizing the phrase first
    ///
    /// Phrases that collapse to the same normalized form overwrite each
    /// other; the last insertion wins.
    pub fn insert(&mut self, phrase: &str, key: impl Into<String>) {
        self.phrases.insert(normalize(phrase), key.into());
    }

    /// Look up the key for an already-normalized phrase
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.phrases.get(phrase).map(String::as_str)
    }

    /// All stored phrases in sorted order (fuzzy match candidates)
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.keys().map(String::as_str)
    }

    /// All phrase -> key pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases.iter().map(|(p, k)| (p.as_str(), k.as_str()))
    }

    /// Number of stored phrases
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the table holds no phrases
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Built-in phrase set used to seed a first run
    pub fn defaults() -> Self {
        let mut table = Self::new();
        table.insert("list files", "ls");
        table.insert("show files", "ls");
        table.insert("clear screen", "clear");
        table.insert("show ip", "ip");
        table.insert("what is my ip", "ip");
        table.insert("disk usage", "disk");
        table.insert("memory usage", "mem");
        table.insert("show processes", "procs");
        table.insert("system info", "sysinfo");
        table.insert("show history", "history");
        table
    }
}

/// Command name -> per-OS template table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTable {
    commands: BTreeMap<String, CommandEntry>,
}

impl CommandTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command entry
    pub fn insert(&mut self, name: impl Into<String>, entry: CommandEntry) {
        self.commands.insert(name.into(), entry);
    }

    /// Look up a command entry by name
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// All command names in sorted order (fuzzy match candidates)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// All name -> entry pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandEntry)> {
        self.commands.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of stored commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table holds no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Built-in command set used to seed a first run
    pub fn defaults() -> Self {
        let mut table = Self::new();
        table.insert("ls", CommandEntry::fallback("ls -la").with_windows("dir"));
        table.insert("clear", CommandEntry::fallback("clear").with_windows("cls"));
        table.insert(
            "ip",
            CommandEntry::fallback("ip addr show")
                .with_darwin("ifconfig")
                .with_windows("ipconfig"),
        );
        table.insert(
            "disk",
            CommandEntry::fallback("df -h")
                .with_windows("wmic logicaldisk get caption,size,freespace"),
        );
        table.insert(
            "mem",
            CommandEntry::fallback("free -h")
                .with_darwin("vm_stat")
                .with_windows("systeminfo"),
        );
        table.insert(
            "procs",
            CommandEntry::fallback("ps aux").with_windows("tasklist"),
        );
        table.insert(
            "ping",
            CommandEntry::fallback("ping -c 4").with_windows("ping -n 4"),
        );
        table
    }
}
