//! Session Operations
//!
//! Builtins over the running session's own surroundings: the instruction
//! history and the listing of everything the program knows how to do.

use super::{BuiltinOp, BuiltinRegistry};
use crate::error::{Error, Result};
use crate::history::{HistoryEntry, HistoryLog};
use crate::tables::{CommandTable, PatternTable};
use std::path::PathBuf;

/// Entries `history` prints when no count is given
const DEFAULT_HISTORY_SHOWN: usize = 20;

const HELP_DESCRIPTION: &str = "List builtin operations, known phrases, and commands";

/// `history` builtin: print or search recorded instructions
///
/// Reads the file fresh on every run so it sees entries the host loop
/// appended earlier in the session.
pub struct HistoryOp {
    path: PathBuf,
    window: usize,
}

impl HistoryOp {
    pub fn new(path: PathBuf, window: usize) -> Self {
        Self { path, window }
    }
}

impl BuiltinOp for HistoryOp {
    fn name(&self) -> &str {
        "history"
    }

    fn description(&self) -> &str {
        "Show recent instructions (history [count] | history search <regex>)"
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let log = HistoryLog::open(&self.path, self.window)?;

        match args.split_first() {
            None => {
                if log.is_empty() {
                    println!("history is empty");
                } else {
                    print_entries(log.recent(DEFAULT_HISTORY_SHOWN));
                }
                Ok(())
            }
            Some((first, rest)) if first == "search" => {
                let pattern = rest.join(" ");
                if pattern.is_empty() {
                    return Err(Error::InvalidArgument {
                        operation: "history".to_string(),
                        reason: "search needs a pattern".to_string(),
                    });
                }
                let matches = log.search_regex(&pattern)?;
                if matches.is_empty() {
                    println!("no matching history entries");
                } else {
                    print_entries(matches.into_iter());
                }
                Ok(())
            }
            Some((first, [])) => match first.parse::<usize>() {
                Ok(count) => {
                    print_entries(log.recent(count));
                    Ok(())
                }
                Err(_) => Err(Error::InvalidArgument {
                    operation: "history".to_string(),
                    reason: format!("'{}' is not a count", first),
                }),
            },
            Some(_) => Err(Error::InvalidArgument {
                operation: "history".to_string(),
                reason: "usage: history [count] | history search <regex>".to_string(),
            }),
        }
    }
}

fn print_entries<'a>(entries: impl Iterator<Item = &'a HistoryEntry>) {
    for entry in entries {
        println!(
            "{}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.raw_input
        );
    }
}

/// `help` builtin: list what the program can do
///
/// Holds a snapshot taken at registration time; build it last so the
/// listing covers the other operations.
pub struct HelpOp {
    builtins: Vec<(String, String)>,
    patterns: Vec<(String, String)>,
    commands: Vec<String>,
}

impl HelpOp {
    pub fn new(
        registry: &BuiltinRegistry,
        patterns: &PatternTable,
        commands: &CommandTable,
    ) -> Self {
        let mut builtins = registry.descriptions();
        builtins.push(("help".to_string(), HELP_DESCRIPTION.to_string()));
        builtins.sort();
        Self {
            builtins,
            patterns: patterns
                .iter()
                .map(|(p, k)| (p.to_string(), k.to_string()))
                .collect(),
            commands: commands.names().map(str::to_string).collect(),
        }
    }
}

impl BuiltinOp for HelpOp {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        HELP_DESCRIPTION
    }

    fn run(&self, _args: &[String]) -> Result<()> {
        println!("builtin operations:");
        for (name, description) in &self.builtins {
            println!("  {:<10} {}", name, description);
        }
        if !self.patterns.is_empty() {
            println!("phrases:");
            for (phrase, key) in &self.patterns {
                println!("  {:<20} -> {}", phrase, key);
            }
        }
        if !self.commands.is_empty() {
            println!("commands: {}", self.commands.join(", "));
        }
        Ok(())
    }
}
