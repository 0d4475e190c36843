//! Integration Tests for Instruction Resolution Flows
//!
//! These tests drive the resolver the way the host does: tables seeded or
//! loaded from disk, the standard builtin registry, and a platform id.

use incant::builtins::{standard_registry, BuiltinRegistry};
use incant::platform::OsId;
use incant::resolver::{ResolvedAction, Resolver};
use incant::tables::{
    load_commands, load_or_seed_commands, load_or_seed_patterns, load_patterns, read_commands,
    read_patterns, CommandEntry, CommandTable, PatternTable,
};
use std::fs;
use tempfile::TempDir;

fn standard_setup(dir: &TempDir) -> (PatternTable, CommandTable, BuiltinRegistry) {
    let patterns = load_or_seed_patterns(&dir.path().join("patterns.json"));
    let commands = load_or_seed_commands(&dir.path().join("commands.json"));
    let registry = standard_registry(&dir.path().join("history"), 100, &patterns, &commands);
    (patterns, commands, registry)
}

#[test]
fn test_default_tables_resolve_phrases_per_os() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("list files", OsId::Linux);
    assert_eq!(action.shell_command(), Some("ls -la"));

    let action = resolver.resolve("list files", OsId::Windows);
    assert_eq!(action.shell_command(), Some("dir"));

    // no macOS override on this one, so the fallback serves
    let action = resolver.resolve("list files", OsId::Darwin);
    assert_eq!(action.shell_command(), Some("ls -la"));

    let action = resolver.resolve("memory usage", OsId::Darwin);
    assert_eq!(action.shell_command(), Some("vm_stat"));
}

#[test]
fn test_messy_input_still_hits_exact_phrase() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("  list \t  files ", OsId::Linux);
    assert_eq!(action.shell_command(), Some("ls -la"));
}

#[test]
fn test_system_info_phrase_reaches_builtin() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    match resolver.resolve("system info", OsId::Linux) {
        ResolvedAction::Builtin { op, args } => {
            assert_eq!(op.name(), "sysinfo");
            assert!(args.is_empty());
        }
        other => panic!("expected the sysinfo builtin, got {:?}", other),
    }
}

#[test]
fn test_builtin_head_keeps_arguments() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    match resolver.resolve("sysinfo --json", OsId::Linux) {
        ResolvedAction::Builtin { op, args } => {
            assert_eq!(op.name(), "sysinfo");
            assert_eq!(args, vec!["--json".to_string()]);
        }
        other => panic!("expected the sysinfo builtin, got {:?}", other),
    }
}

#[test]
fn test_show_history_phrase_reaches_builtin() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("show history", OsId::Linux);
    assert_eq!(action.builtin_name(), Some("history"));
}

#[test]
fn test_help_is_always_available() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("help", OsId::Linux);
    assert_eq!(action.builtin_name(), Some("help"));
}

#[test]
fn test_builtin_name_outranks_command_entry() {
    let dir = TempDir::new().unwrap();
    let (patterns, mut commands, _) = standard_setup(&dir);

    // a user-defined command colliding with a builtin name loses
    commands.insert("history", CommandEntry::fallback("cat ~/.bash_history"));
    let builtins = standard_registry(&dir.path().join("history"), 100, &patterns, &commands);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("history 5", OsId::Linux);
    assert_eq!(action.builtin_name(), Some("history"));
}

#[test]
fn test_typo_recovers_via_fuzzy_phrase() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("list fils", OsId::Linux);
    assert_eq!(action.shell_command(), Some("ls -la"));

    // a fuzzy phrase can land on a builtin too
    let action = resolver.resolve("show historp", OsId::Linux);
    assert_eq!(action.builtin_name(), Some("history"));
}

#[test]
fn test_typo_in_command_name_keeps_arguments() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("pingg example.com", OsId::Linux);
    assert_eq!(action.shell_command(), Some("ping -c 4 example.com"));
}

#[test]
fn test_unknown_instruction_passes_through() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("frobnicate the widgets", OsId::Linux);
    assert_eq!(action.shell_command(), Some("frobnicate the widgets"));
}

#[test]
fn test_empty_instruction_resolves_to_nothing() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    assert!(resolver.resolve("", OsId::Linux).is_no_match());
    assert!(resolver.resolve("   \t ", OsId::Linux).is_no_match());
}

#[test]
fn test_custom_tables_from_disk_end_to_end() {
    let dir = TempDir::new().unwrap();
    let patterns_path = dir.path().join("patterns.json");
    let commands_path = dir.path().join("commands.json");

    fs::write(
        &patterns_path,
        r#"{"deploy the app": "deploy", "ship it": "deploy"}"#,
    )
    .unwrap();
    fs::write(
        &commands_path,
        r#"{
            "deploy": {"linux": "./deploy.sh", "windows": "deploy.bat"},
            "status": "git status"
        }"#,
    )
    .unwrap();

    let patterns = read_patterns(&patterns_path).unwrap();
    let commands = read_commands(&commands_path).unwrap();
    let builtins = BuiltinRegistry::new();
    let resolver = Resolver::new(&patterns, &commands, &builtins);

    let action = resolver.resolve("deploy the app", OsId::Windows);
    assert_eq!(action.shell_command(), Some("deploy.bat"));

    let action = resolver.resolve("ship it", OsId::Linux);
    assert_eq!(action.shell_command(), Some("./deploy.sh"));

    // the bare-string shorthand behaves like a fallback-only entry
    let action = resolver.resolve("status --short", OsId::Windows);
    assert_eq!(action.shell_command(), Some("git status --short"));
}

#[test]
fn test_malformed_tables_degrade_to_passthrough() {
    let dir = TempDir::new().unwrap();
    let patterns_path = dir.path().join("patterns.json");
    let commands_path = dir.path().join("commands.json");
    fs::write(&patterns_path, "not json").unwrap();
    fs::write(&commands_path, "[1, 2, 3]").unwrap();

    let patterns = load_patterns(&patterns_path);
    let commands = load_commands(&commands_path);
    assert!(patterns.is_empty());
    assert!(commands.is_empty());

    // with nothing to match, everything is shell passthrough
    let builtins = BuiltinRegistry::new();
    let resolver = Resolver::new(&patterns, &commands, &builtins);
    let action = resolver.resolve("list files", OsId::Linux);
    assert_eq!(action.shell_command(), Some("list files"));
}

#[test]
fn test_seeded_tables_survive_a_second_startup() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, _) = standard_setup(&dir);

    assert!(dir.path().join("patterns.json").exists());
    assert!(dir.path().join("commands.json").exists());

    // second startup reads back exactly what the first one seeded
    let (reloaded_patterns, reloaded_commands, builtins) = standard_setup(&dir);
    assert_eq!(reloaded_patterns, patterns);
    assert_eq!(reloaded_commands, commands);

    let resolver = Resolver::new(&reloaded_patterns, &reloaded_commands, &builtins);
    let action = resolver.resolve("disk usage", OsId::Linux);
    assert_eq!(action.shell_command(), Some("df -h"));
}

#[test]
fn test_threshold_from_configuration_is_honored() {
    let dir = TempDir::new().unwrap();
    let (patterns, commands, builtins) = standard_setup(&dir);

    // "list fzles" sits at score 90 against "list files"
    let strict = Resolver::new(&patterns, &commands, &builtins).with_threshold(95);
    let action = strict.resolve("list fzles", OsId::Linux);
    assert_eq!(action.shell_command(), Some("list fzles"));

    let lenient = Resolver::new(&patterns, &commands, &builtins).with_threshold(85);
    let action = lenient.resolve("list fzles", OsId::Linux);
    assert_eq!(action.shell_command(), Some("ls -la"));
}
