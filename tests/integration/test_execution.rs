//! Integration Tests for Resolve-then-Execute Flows
//!
//! These tests run the whole pipeline the way the host loop does: record
//! the instruction, resolve it, and hand the action to the executor.

use incant::builtins::{standard_registry, BuiltinRegistry};
use incant::execution::Executor;
use incant::history::HistoryLog;
use incant::platform::OsId;
use incant::resolver::{ResolvedAction, Resolver};
use incant::tables::{CommandEntry, CommandTable, PatternTable};
use tempfile::TempDir;

fn empty_tables() -> (PatternTable, CommandTable, BuiltinRegistry) {
    (
        PatternTable::new(),
        CommandTable::new(),
        BuiltinRegistry::new(),
    )
}

#[cfg(unix)]
#[test]
fn test_passthrough_command_executes() {
    let (patterns, commands, builtins) = empty_tables();
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::Linux);

    let action = resolver.resolve("true", OsId::Linux);
    assert_eq!(action.shell_command(), Some("true"));
    assert_eq!(executor.run(&action).unwrap(), 0);
}

#[cfg(unix)]
#[test]
fn test_template_command_executes_with_tail() {
    let patterns = PatternTable::new();
    let mut commands = CommandTable::new();
    commands.insert("greet", CommandEntry::fallback("echo hello"));
    let builtins = BuiltinRegistry::new();
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::Linux);

    let action = resolver.resolve("greet world", OsId::Linux);
    assert_eq!(action.shell_command(), Some("echo hello world"));
    assert_eq!(executor.run(&action).unwrap(), 0);
}

#[cfg(unix)]
#[test]
fn test_exit_codes_come_back_as_data() {
    let (patterns, commands, builtins) = empty_tables();
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::Linux);

    let action = resolver.resolve("exit 7", OsId::Linux);
    assert_eq!(executor.run(&action).unwrap(), 7);
}

#[test]
fn test_sysinfo_builtin_through_executor() {
    let dir = TempDir::new().unwrap();
    let patterns = PatternTable::defaults();
    let commands = CommandTable::defaults();
    let builtins = standard_registry(&dir.path().join("history"), 100, &patterns, &commands);
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::detect());

    let action = resolver.resolve("sysinfo", OsId::detect());
    assert_eq!(action.builtin_name(), Some("sysinfo"));
    assert_eq!(executor.run(&action).unwrap(), 0);

    let action = resolver.resolve("sysinfo --json", OsId::detect());
    assert_eq!(executor.run(&action).unwrap(), 0);
}

#[test]
fn test_builtin_rejects_unknown_argument() {
    let dir = TempDir::new().unwrap();
    let patterns = PatternTable::defaults();
    let commands = CommandTable::defaults();
    let builtins = standard_registry(&dir.path().join("history"), 100, &patterns, &commands);
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::detect());

    let action = resolver.resolve("sysinfo --frobnicate", OsId::detect());
    assert_eq!(action.builtin_name(), Some("sysinfo"));
    assert!(executor.run(&action).is_err());
}

#[test]
fn test_history_builtin_sees_recorded_instructions() {
    let dir = TempDir::new().unwrap();
    let history_path = dir.path().join("history");

    let mut log = HistoryLog::open(&history_path, 100).unwrap();
    log.append("list files").unwrap();
    log.append("show ip").unwrap();

    let patterns = PatternTable::defaults();
    let commands = CommandTable::defaults();
    let builtins = standard_registry(&history_path, 100, &patterns, &commands);
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::detect());

    for instruction in ["history", "history 1", "history search files"] {
        let action = resolver.resolve(instruction, OsId::detect());
        assert_eq!(action.builtin_name(), Some("history"));
        assert_eq!(executor.run(&action).unwrap(), 0, "'{}' failed", instruction);
    }

    // a broken regex surfaces as an execution error, not a panic
    let action = resolver.resolve("history search (", OsId::detect());
    assert!(executor.run(&action).is_err());
}

#[test]
fn test_no_match_is_never_executable() {
    let executor = Executor::new(OsId::detect());
    assert!(executor.run(&ResolvedAction::NoMatch).is_err());
}

#[cfg(unix)]
#[test]
fn test_host_loop_records_then_resolves_then_runs() {
    let dir = TempDir::new().unwrap();
    let history_path = dir.path().join("history");

    let patterns = PatternTable::defaults();
    let commands = CommandTable::defaults();
    let builtins = standard_registry(&history_path, 100, &patterns, &commands);
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::Linux);
    let mut history = HistoryLog::open(&history_path, 100).unwrap();

    // the loop body: append, resolve, execute
    let instruction = "echo pipeline-check";
    history.append(instruction).unwrap();
    let action = resolver.resolve(instruction, OsId::Linux);
    assert_eq!(executor.run(&action).unwrap(), 0);

    // the instruction is on disk for the next session and for `history`
    let reloaded = HistoryLog::open(&history_path, 100).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(
        reloaded.entries().next().unwrap().raw_input,
        instruction
    );

    let action = resolver.resolve("show history", OsId::Linux);
    assert_eq!(executor.run(&action).unwrap(), 0);
}

#[cfg(unix)]
#[test]
fn test_failing_command_does_not_stop_the_session() {
    let (patterns, commands, builtins) = empty_tables();
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let executor = Executor::new(OsId::Linux);

    // command-not-found comes back as the shell's 127, not an error
    let action = resolver.resolve("definitely-not-a-real-command-xyz", OsId::Linux);
    assert_eq!(executor.run(&action).unwrap(), 127);

    // and the executor still works afterwards
    let action = resolver.resolve("true", OsId::Linux);
    assert_eq!(executor.run(&action).unwrap(), 0);
}
