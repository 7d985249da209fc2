//! Thicket - fuzzy, alias-aware recall for Claude Code
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use thicket::cli::expand::{ExpandCommand, ExpandOptions};
use thicket::cli::load_dictionary;
use thicket::cli::search::{SearchCommand, SearchOptions};
use thicket::config::{thicket_home, Config};
use thicket::error::{exit_codes, FailOpen};
use thicket::hooks::{parse_input, read_stdin, HookInput, HookRunner, HookType};
use thicket::storage::FileCorpus;

// =============================================================================
// CLI Definition
// =============================================================================

/// Thicket - fuzzy, alias-aware recall for Claude Code
#[derive(Parser)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// [Internal] Run a hook (JSON stdin/stdout). Called by Claude Code hooks
    Hook {
        /// The hook event type
        #[arg(value_enum)]
        event: HookEvent,
    },

    /// [User] Search sessions, decisions, patterns and rules
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// [User] Show how a query expands through the tag dictionary
    Expand {
        /// Query to expand
        query: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum HookEvent {
    UserPromptSubmit,
}

impl From<HookEvent> for HookType {
    fn from(event: HookEvent) -> Self {
        match event {
            HookEvent::UserPromptSubmit => HookType::UserPromptSubmit,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    // Set up panic handler
    setup_panic_handler();

    // Run the CLI
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("thicket error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.thicket/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("thicket panic: {}", info);

        if let Some(home) = thicket_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Install the stderr log subscriber.
///
/// Stdout is reserved for command and hook output.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let config = Config::load_from_cwd(&cwd);
    init_logging(&config.logging.level);

    match cli.command {
        Commands::Hook { event } => Ok(run_hook(event.into(), config, &cwd)),
        Commands::Search {
            query,
            json,
            quiet,
            limit,
        } => run_search(&query, json, quiet, limit, config, &cwd),
        Commands::Expand { query, json } => run_expand(&query, json, &config, &cwd),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Run a hook. Always exits with `SUCCESS` so a failure never blocks a prompt.
fn run_hook(hook_type: HookType, config: Config, process_cwd: &Path) -> ExitCode {
    let input = read_stdin().fail_open_default("reading hook input");

    // Resolve the project from the payload; hooks may run outside it.
    let cwd = parse_input::<HookInput>(&input)
        .map(|hook_input| hook_input.cwd)
        .ok()
        .filter(|cwd| cwd.is_dir())
        .unwrap_or_else(|| process_cwd.to_path_buf());
    let config = if cwd == process_cwd {
        config
    } else {
        Config::load_from_cwd(&cwd)
    };

    let dictionary = load_dictionary(&config, &cwd).fail_open_default("loading alias dictionary");
    let corpus = FileCorpus::for_project(&cwd);
    let runner = HookRunner::new(corpus, config, dictionary);

    let output = runner
        .run_with_input(hook_type, &input)
        .fail_open_default("running hook");

    if let Some(output) = output {
        println!("{}", output);
    }

    ExitCode::from(exit_codes::SUCCESS as u8)
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn run_search(
    query: &str,
    json: bool,
    quiet: bool,
    limit: Option<usize>,
    config: Config,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dictionary = load_dictionary(&config, cwd)?;
    let corpus = FileCorpus::for_project(cwd);

    let cmd = SearchCommand::new(corpus, config, dictionary);
    let options = SearchOptions { json, quiet, limit };

    let output = cmd.run(query, &options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_expand(
    query: &str,
    json: bool,
    config: &Config,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dictionary = load_dictionary(config, cwd)?;

    let cmd = ExpandCommand::new(dictionary);
    let options = ExpandOptions { json };

    let output = cmd.run(query);
    println!("{}", cmd.format_output(&output, &options));

    Ok(ExitCode::from(exit_codes::SUCCESS as u8))
}
