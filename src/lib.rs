//! incant - resolve free-form instructions into executable actions
//!
//! This library turns arbitrary instruction text ("list files", "ping
//! example.com", "show me my ip") into a concrete, typed action: an
//! in-process builtin operation, an OS-specific shell command line, or an
//! explicit no-match for empty input.
//!
//! ## Features
//!
//! - **Priority ladder:** Exact phrase match, first-token match, fuzzy
//!   match, then verbatim shell passthrough - in that order, first hit wins
//! - **Per-OS commands:** One logical command name, one template per
//!   platform, with a mandatory linux fallback
//! - **Builtin operations:** In-process operations (`sysinfo`, `history`,
//!   `help`) that outrank shell commands wherever both apply
//! - **Injectable similarity:** Fuzzy matching runs on a single 0..=100
//!   scale behind a trait, so the metric can be swapped or pinned in tests
//! - **Append-only history:** Every accepted instruction recorded as a
//!   JSON line with a timestamp
//! - **Configuration:** TOML/JSON config files with degrade-to-defaults
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`resolver`] - The resolution pipeline and [`resolver::ResolvedAction`]
//! - [`tables`] - Pattern and command tables, JSON loading, first-run seeding
//! - [`builtins`] - Builtin operation trait, registry, standard operations
//! - [`similarity`] - Similarity scoring trait and the edit-distance default
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### Host Plumbing
//!
//! - [`config`] - Configuration model and file loading
//! - [`execution`] - Blocking executor for resolved actions
//! - [`history`] - File-backed instruction history
//! - [`platform`] - Host platform classification
//!
//! ## Quick Start
//!
//! ```
//! use incant::builtins::BuiltinRegistry;
//! use incant::platform::OsId;
//! use incant::resolver::Resolver;
//! use incant::tables::{CommandEntry, CommandTable, PatternTable};
//!
//! let mut patterns = PatternTable::new();
//! patterns.insert("list files", "ls");
//!
//! let mut commands = CommandTable::new();
//! commands.insert("ls", CommandEntry::fallback("ls -la").with_windows("dir"));
//!
//! let builtins = BuiltinRegistry::new();
//! let resolver = Resolver::new(&patterns, &commands, &builtins);
//!
//! let action = resolver.resolve("list files", OsId::Linux);
//! assert_eq!(action.shell_command(), Some("ls -la"));
//! ```
//!
//! ## Architecture
//!
//! Resolution is a pure query over three read-only inputs built once at
//! startup: the pattern table, the command table, and the builtin registry.
//! The resolver never spawns processes and never fails for non-empty input;
//! execution lives entirely in [`execution::Executor`], which reports
//! builtin failures and spawn failures as structured errors and exit codes
//! as plain data. One instruction is resolved and executed at a time; no
//! locking, no shared mutable state.
//!
//! ## Safety and Reliability
//!
//! - **No Panics:** All fallible operations return `Result`
//! - **Total Resolution:** Every non-empty instruction resolves to an
//!   action; the worst case is a verbatim passthrough to the shell
//! - **Graceful Degradation:** Missing or malformed table and config files
//!   degrade to empty tables or defaults with a logged warning
//! - **No Silent Failures:** Execution errors propagate to the caller;
//!   nothing is caught and ignored

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;

// Core modules
pub mod builtins;
pub mod resolver;
pub mod similarity;
pub mod tables;

// Host plumbing
pub mod execution;
pub mod history;
pub mod platform;

// Re-exports for core functionality
pub use error::{Error, Result};
pub use platform::OsId;
pub use resolver::{compose, normalize, ResolvedAction, Resolver};

// Convenience re-exports for common types
pub use builtins::{standard_registry, BuiltinOp, BuiltinRegistry};
pub use config::{AppConfig, ConfigLoader};
pub use execution::Executor;
pub use history::{HistoryEntry, HistoryLog};
pub use similarity::{EditDistanceScorer, SimilarityScorer};
pub use tables::{CommandEntry, CommandTable, PatternTable};

// Version information
/// The current version of incant from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
