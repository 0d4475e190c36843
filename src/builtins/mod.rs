//! Builtin Operations
//!
//! Operations the program runs in-process instead of handing to a shell.
//! The registry is populated by the host at startup and read-only after
//! that; the resolver consults it by name and hands out shared operation
//! handles.

pub mod session;
pub mod system;

pub use session::{HelpOp, HistoryOp};
pub use system::SysInfoOp;

use crate::error::Result;
use crate::tables::{CommandTable, PatternTable};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// One builtin operation
///
/// Arguments in, side effects out. Failures come back as errors and are
/// reported by the caller, never swallowed.
pub trait BuiltinOp: Send + Sync {
    /// Name the resolver matches against
    fn name(&self) -> &str;

    /// One-line description for listings
    fn description(&self) -> &str;

    /// Run the operation
    fn run(&self, args: &[String]) -> Result<()>;
}

/// Name -> operation lookup, ordered for stable listings
#[derive(Default)]
pub struct BuiltinRegistry {
    ops: BTreeMap<String, Arc<dyn BuiltinOp>>,
}

impl BuiltinRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under its own name
    ///
    /// Re-registering a name replaces the earlier operation.
    pub fn register(&mut self, op: Arc<dyn BuiltinOp>) {
        let name = op.name().to_string();
        if self.ops.insert(name.clone(), op).is_some() {
            debug!("Replaced builtin '{}'", name);
        }
    }

    /// Fetch a shared handle to an operation
    pub fn get(&self, name: &str) -> Option<Arc<dyn BuiltinOp>> {
        self.ops.get(name).cloned()
    }

    /// Whether an operation is registered under this name
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// Sorted (name, description) pairs for listings
    pub fn descriptions(&self) -> Vec<(String, String)> {
        self.ops
            .values()
            .map(|op| (op.name().to_string(), op.description().to_string()))
            .collect()
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Assemble the standard operation set
///
/// `help` is built last so its listing covers everything registered before
/// it.
pub fn standard_registry(
    history_path: &Path,
    history_window: usize,
    patterns: &PatternTable,
    commands: &CommandTable,
) -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();
    registry.register(Arc::new(SysInfoOp::new()));
    registry.register(Arc::new(HistoryOp::new(
        history_path.to_path_buf(),
        history_window,
    )));
    let help = HelpOp::new(&registry, patterns, commands);
    registry.register(Arc::new(help));
    registry
}
