//! Instruction History
//!
//! Append-only record of every instruction the host loop accepts, one JSON
//! object per line. Prior lines are never rewritten or deleted; the
//! in-memory window is bounded, the file only grows.

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Default history file name (in the home directory)
pub const DEFAULT_HISTORY_FILE: &str = ".incant_history";

/// Default cap on the in-memory window
pub const MAX_HISTORY_ENTRIES: usize = 10_000;

/// One recorded instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub raw_input: String,
}

/// File-backed instruction history
pub struct HistoryLog {
    path: PathBuf,
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl HistoryLog {
    /// Open a history log, loading the window from disk
    ///
    /// Lines that fail to parse are skipped. A missing file is an empty
    /// log; the file appears on first append.
    pub fn open(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self> {
        let path = path.into();
        let mut entries = VecDeque::new();

        if path.exists() {
            let file = File::open(&path).map_err(|e| Error::HistoryLoadFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|e| Error::HistoryLoadFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<HistoryEntry>(&line) {
                    Ok(entry) => entries.push_back(entry),
                    Err(e) => debug!("Skipping unreadable history line: {}", e),
                }
            }
            while entries.len() > max_entries {
                entries.pop_front();
            }
        }

        debug!("History window holds {} entries", entries.len());
        Ok(Self {
            path,
            entries,
            max_entries,
        })
    }

    /// Open the default history file with the default window
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path(), MAX_HISTORY_ENTRIES)
    }

    /// Default history file location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_HISTORY_FILE)
    }

    /// Record one instruction, timestamped now
    ///
    /// Appends a line to the file; nothing already written is touched.
    pub fn append(&mut self, raw_input: &str) -> Result<()> {
        let entry = HistoryEntry {
            timestamp: Local::now(),
            raw_input: raw_input.to_string(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;

        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        Ok(())
    }

    /// All entries in the window, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// Entries whose instruction contains a substring
    pub fn search(&self, needle: &str) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.raw_input.contains(needle))
            .collect()
    }

    /// Entries whose instruction matches a regex
    pub fn search_regex(&self, pattern: &str) -> Result<Vec<&HistoryEntry>> {
        let re = Regex::new(pattern)?;
        Ok(self
            .entries
            .iter()
            .filter(|e| re.is_match(&e.raw_input))
            .collect())
    }

    /// Number of entries in the window
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
