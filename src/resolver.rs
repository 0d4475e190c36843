//! Instruction Resolution
//!
//! Turns a free-form instruction into a concrete action by walking a fixed
//! priority ladder:
//!
//! 1. empty input resolves to nothing
//! 2. the whole normalized input as a known phrase
//! 3. the first token as a builtin name, a known phrase, or a command name
//! 4. fuzzy match, phrases over the whole input before command names over
//!    the first token
//! 5. verbatim passthrough to the shell
//!
//! Exact matches always outrank fuzzy ones, and builtin operations outrank
//! shell commands wherever both are consulted. Every non-empty instruction
//! resolves to something; `NoMatch` only comes out of stage 1.
//!
//! The resolver holds shared references to tables built once at startup
//! and never mutates them.

use crate::builtins::{BuiltinOp, BuiltinRegistry};
use crate::platform::OsId;
use crate::similarity::{best_match, SimilarityScorer, DEFAULT_THRESHOLD};
use crate::tables::{CommandTable, PatternTable};
use std::fmt;
use std::sync::Arc;

/// Outcome of resolving one instruction
///
/// Produced fresh per call and owned by the caller. A `Builtin` action
/// carries the operation handle itself, so executing it needs no further
/// registry access.
pub enum ResolvedAction {
    /// Invoke a builtin operation with these arguments
    Builtin {
        op: Arc<dyn BuiltinOp>,
        args: Vec<String>,
    },
    /// Hand this command line to the platform shell
    Shell { command_line: String },
    /// Nothing to do (empty instruction)
    NoMatch,
}

impl ResolvedAction {
    /// Whether this is the no-match outcome
    pub fn is_no_match(&self) -> bool {
        matches!(self, ResolvedAction::NoMatch)
    }

    /// The shell command line, if this is a shell action
    pub fn shell_command(&self) -> Option<&str> {
        match self {
            ResolvedAction::Shell { command_line } => Some(command_line),
            _ => None,
        }
    }

    /// The builtin operation name, if this is a builtin action
    pub fn builtin_name(&self) -> Option<&str> {
        match self {
            ResolvedAction::Builtin { op, .. } => Some(op.name()),
            _ => None,
        }
    }
}

impl fmt::Debug for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedAction::Builtin { op, args } => f
                .debug_struct("Builtin")
                .field("op", &op.name())
                .field("args", args)
                .finish(),
            ResolvedAction::Shell { command_line } => f
                .debug_struct("Shell")
                .field("command_line", command_line)
                .finish(),
            ResolvedAction::NoMatch => write!(f, "NoMatch"),
        }
    }
}

impl fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedAction::Builtin { op, args } => {
                if args.is_empty() {
                    write!(f, "builtin: {}", op.name())
                } else {
                    write!(f, "builtin: {} {}", op.name(), args.join(" "))
                }
            }
            ResolvedAction::Shell { command_line } => write!(f, "shell: {}", command_line),
            ResolvedAction::NoMatch => write!(f, "no match"),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim the ends
///
/// Total and idempotent; the one normalization applied to instructions and
/// stored phrases alike.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append tail arguments to a command template
///
/// Plain joining with single spaces, trimmed. No quoting or escaping; the
/// line goes to the shell as the user composed it.
pub fn compose(template: &str, tail: &[String]) -> String {
    let mut line = String::from(template);
    if !tail.is_empty() {
        line.push(' ');
        line.push_str(&tail.join(" "));
    }
    line.trim().to_string()
}

static DEFAULT_SCORER: crate::similarity::EditDistanceScorer =
    crate::similarity::EditDistanceScorer;

/// Instruction resolver over immutable tables
pub struct Resolver<'a> {
    patterns: &'a PatternTable,
    commands: &'a CommandTable,
    builtins: &'a BuiltinRegistry,
    scorer: &'a dyn SimilarityScorer,
    threshold: u32,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with the default scorer and threshold
    pub fn new(
        patterns: &'a PatternTable,
        commands: &'a CommandTable,
        builtins: &'a BuiltinRegistry,
    ) -> Self {
        Self {
            patterns,
            commands,
            builtins,
            scorer: &DEFAULT_SCORER,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Swap in a different similarity scorer
    pub fn with_scorer(mut self, scorer: &'a dyn SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Use a different fuzzy acceptance cutoff
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Resolve one instruction into an action
    pub fn resolve(&self, raw_input: &str, os: OsId) -> ResolvedAction {
        let input = normalize(raw_input);
        if input.is_empty() {
            trace!("Empty instruction");
            return ResolvedAction::NoMatch;
        }

        // the whole input as a known phrase
        if let Some(key) = self.patterns.lookup(&input) {
            if let Some(action) = self.action_for_key(key, &[], os) {
                debug!("Exact phrase match: '{}' -> '{}'", input, key);
                return action;
            }
        }

        // first token routing; input is normalized so a plain space split
        // is exact
        let mut parts = input.split(' ');
        let head = parts.next().unwrap_or_default();
        let tail: Vec<String> = parts.map(str::to_string).collect();

        if let Some(op) = self.builtins.get(head) {
            debug!("Builtin match: '{}'", head);
            return ResolvedAction::Builtin { op, args: tail };
        }

        if let Some(key) = self.patterns.lookup(head) {
            if let Some(action) = self.action_for_key(key, &tail, os) {
                debug!("Phrase head match: '{}' -> '{}'", head, key);
                return action;
            }
        }

        if let Some(entry) = self.commands.get(head) {
            debug!("Command match: '{}'", head);
            return ResolvedAction::Shell {
                command_line: compose(entry.template_for(os), &tail),
            };
        }

        // nearest phrase over the whole input, then nearest command name
        // over the head
        if let Some((phrase, score)) =
            best_match(self.scorer, &input, self.patterns.phrases(), self.threshold)
        {
            if let Some(key) = self.patterns.lookup(phrase) {
                if let Some(action) = self.action_for_key(key, &[], os) {
                    debug!(
                        "Fuzzy phrase match: '{}' ~ '{}' (score {})",
                        input, phrase, score
                    );
                    return action;
                }
            }
        }

        if let Some((name, score)) =
            best_match(self.scorer, head, self.commands.names(), self.threshold)
        {
            if let Some(entry) = self.commands.get(name) {
                debug!(
                    "Fuzzy command match: '{}' ~ '{}' (score {})",
                    head, name, score
                );
                return ResolvedAction::Shell {
                    command_line: compose(entry.template_for(os), &tail),
                };
            }
        }

        // nothing matched: the shell gets it verbatim
        debug!("Passthrough: '{}'", input);
        ResolvedAction::Shell {
            command_line: input,
        }
    }

    /// Map a pattern key onto an action, builtins first
    ///
    /// `None` for a key found in neither table, which sends resolution on
    /// to the next stage.
    fn action_for_key(&self, key: &str, tail: &[String], os: OsId) -> Option<ResolvedAction> {
        if let Some(op) = self.builtins.get(key) {
            return Some(ResolvedAction::Builtin {
                op,
                args: tail.to_vec(),
            });
        }
        self.commands.get(key).map(|entry| ResolvedAction::Shell {
            command_line: compose(entry.template_for(os), tail),
        })
    }
}
