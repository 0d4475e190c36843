//! incant - resolve free-form instructions into commands and run them
//!
//! The host program: parses arguments, assembles the tables, history, and
//! builtin registry once at startup, then runs either a single instruction
//! (`--eval`) or an interactive read-resolve-execute loop.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info, warn};

use incant::builtins::standard_registry;
use incant::config::{AppConfig, ConfigLoader};
use incant::execution::Executor;
use incant::history::HistoryLog;
use incant::platform::OsId;
use incant::resolver::Resolver;
use incant::tables::{load_or_seed_commands, load_or_seed_patterns};
use incant::VERSION;

/// Application configuration from the command line
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// One-shot instruction to resolve and execute
    eval: Option<String>,
    /// Print resolved actions instead of executing them
    dry_run: bool,
    /// Enable debug logging
    debug: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        Self::parse_from(&args)
    }

    fn parse_from(args: &[String]) -> Result<Self> {
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        bail!("missing config file path");
                    }
                }
                "--eval" | "-e" => {
                    if i + 1 < args.len() {
                        app_args.eval = Some(args[i + 1].clone());
                        i += 1;
                    } else {
                        bail!("missing instruction for --eval");
                    }
                }
                "--dry-run" => {
                    app_args.dry_run = true;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("incant v{}", VERSION);
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    bail!("unknown option: {}", arg);
                }
                _ => {
                    eprintln!("Ignoring positional argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("incant - resolve free-form instructions into commands and run them");
    println!();
    println!("USAGE:");
    println!("    incant [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -e, --eval <TEXT>      Resolve and execute one instruction, then exit");
    println!("        --dry-run          Print resolved actions instead of executing them");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    incant looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $INCANT_CONFIG_DIR/config.toml");
    println!("    3. $XDG_CONFIG_HOME/incant/config.toml (or the platform equivalent)");
    println!("    4. ~/.incant/config.toml");
    println!("    5. ./.incant.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("    Each location is also tried with a .json extension. The pattern and");
    println!("    command tables live next to the configuration file as patterns.json");
    println!("    and commands.json; missing tables are seeded on first run.");
    println!();
    println!("ENVIRONMENT:");
    println!("    INCANT_CONFIG          Path to configuration file");
    println!("    INCANT_CONFIG_DIR      Directory for configuration and table files");
    println!("    INCANT_DEBUG           Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn main() -> Result<()> {
    // Parse command line arguments first
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    // Initialize logging based on debug flag
    let log_level = if args.debug
        || env::var("INCANT_DEBUG").map_or(false, |v| v == "1" || v.to_lowercase() == "true")
    {
        "debug"
    } else {
        "info"
    };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Starting incant v{}", VERSION);

    // Load configuration
    let config = load_configuration(&args)?;

    // Classify the platform once; everything downstream receives it
    let os = OsId::detect();
    debug!("Platform classified as '{}'", os.as_str());

    // Assemble tables, history, and builtins
    let patterns = load_or_seed_patterns(&config.patterns_path());
    let commands = load_or_seed_commands(&config.commands_path());

    let history_path = config.history_path();
    let mut history = HistoryLog::open(&history_path, config.history.max_entries)
        .with_context(|| format!("failed to open history at '{}'", history_path.display()))?;

    let builtins = standard_registry(
        &history_path,
        config.history.max_entries,
        &patterns,
        &commands,
    );

    let resolver = Resolver::new(&patterns, &commands, &builtins)
        .with_threshold(config.resolver.fuzzy_threshold);
    let executor = Executor::new(os);

    match &args.eval {
        Some(instruction) => {
            let code = run_once(
                &resolver,
                &executor,
                &mut history,
                os,
                instruction,
                args.dry_run,
            )?;
            if code != 0 {
                process::exit(code);
            }
        }
        None => run_repl(&resolver, &executor, &mut history, os, args.dry_run)?,
    }

    Ok(())
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> Result<AppConfig> {
    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("INCANT_CONFIG").ok().map(PathBuf::from));

    // An explicitly named file must load; the search paths degrade to
    // defaults instead.
    let config = if let Some(path) = &config_path {
        debug!("Loading config from: {}", path.display());
        ConfigLoader::new()
            .load_file(path)
            .with_context(|| format!("failed to load configuration from '{}'", path.display()))?
    } else {
        match ConfigLoader::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration: {}. Using defaults", e);
                AppConfig::default()
            }
        }
    };

    debug!("Configuration loaded successfully");
    Ok(config)
}

/// Resolve and execute a single instruction, returning its exit code
fn run_once(
    resolver: &Resolver<'_>,
    executor: &Executor,
    history: &mut HistoryLog,
    os: OsId,
    instruction: &str,
    dry_run: bool,
) -> Result<i32> {
    if instruction.trim().is_empty() {
        bail!("empty instruction");
    }

    if let Err(e) = history.append(instruction) {
        warn!("Could not record history: {}", e);
    }

    let action = resolver.resolve(instruction, os);
    debug!("Resolved to {}", action);

    if dry_run {
        println!("{}", action);
        return Ok(0);
    }

    executor
        .run(&action)
        .with_context(|| format!("failed to execute '{}'", instruction))
}

/// The interactive read-resolve-execute loop
fn run_repl(
    resolver: &Resolver<'_>,
    executor: &Executor,
    history: &mut HistoryLog,
    os: OsId,
    dry_run: bool,
) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("incant> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: leave the prompt line clean and end the session
            println!();
            break;
        }

        let instruction = line.trim();
        if instruction.is_empty() {
            continue;
        }
        if instruction == "exit" || instruction == "quit" {
            break;
        }

        if let Err(e) = history.append(instruction) {
            warn!("Could not record history: {}", e);
        }

        let action = resolver.resolve(instruction, os);
        debug!("Resolved to {}", action);

        if dry_run {
            println!("{}", action);
            continue;
        }

        match executor.run(&action) {
            Ok(0) => {}
            Ok(code) => warn!("Command exited with status {}", code),
            Err(e) => error!("{}", e),
        }
    }

    Ok(())
}
