//! libscout - release monitor and study queue
//!
//! CLI entry point.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use libscout::config::Config;
use libscout::error::exit_codes;
use libscout::fetch::PyPiFetcher;
use libscout::registry::PackageRegistry;
use libscout::storage::{FileStateStore, StateStore};
use libscout::LibraryMonitor;

// =============================================================================
// CLI Definition
// =============================================================================

/// libscout - release monitor and study queue for tracked packages
#[derive(Parser)]
#[command(name = "libscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current status of all tracked packages
    Status {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Check the package index for updates
    Check {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Restrict the check to a package (repeatable)
        #[arg(long = "package")]
        packages: Vec<String>,
    },

    /// Show changes detected in the last N days
    Changes {
        /// How many days to look back
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show only packages with updates available
    Outdated {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Mark a package as updated after upgrading it locally
    MarkUpdated {
        /// The package to acknowledge
        package: String,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show learning opportunities from recent changes
    Learn {
        /// Restrict to one package
        package: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List the configured watch list
    Packages {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Track deep-dive study sessions
    Study {
        #[command(subcommand)]
        action: StudyAction,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },
}

#[derive(Subcommand)]
enum StudyAction {
    /// Start a session for a package
    Start {
        /// The package to study
        package: String,
        /// Version to study (defaults to the latest observed)
        #[arg(long)]
        version: Option<String>,
    },
    /// Finish the open session
    Finish {
        /// Flashcards created during the session
        #[arg(long, default_value_t = 0)]
        cards: u32,
        /// Session notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show the open session
    Show,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("libscout error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Install the tracing subscriber.
///
/// Filter comes from `LIBSCOUT_LOG` (tracing env-filter syntax); warnings
/// and up go to stderr by default so machine-readable stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("LIBSCOUT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI and return the exit code.
async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Status { json, quiet } => run_status(&config, json, quiet),
        Commands::Check {
            json,
            quiet,
            packages,
        } => run_check(&config, json, quiet, packages).await,
        Commands::Changes { days, json, quiet } => run_changes(&config, days, json, quiet),
        Commands::Outdated { json, quiet } => run_outdated(&config, json, quiet),
        Commands::MarkUpdated {
            package,
            json,
            quiet,
        } => run_mark_updated(&config, &package, json, quiet),
        Commands::Learn {
            package,
            json,
            quiet,
        } => run_learn(&config, package, json, quiet),
        Commands::Packages { json, quiet } => run_packages(json, quiet),
        Commands::Study {
            action,
            json,
            quiet,
        } => run_study(&config, action, json, quiet),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn open_store(config: &Config) -> Result<FileStateStore, Box<dyn std::error::Error>> {
    let path = config
        .state_path()
        .ok_or("could not determine state file location (no home directory)")?;
    Ok(FileStateStore::new(path)?)
}

fn build_monitor(
    config: &Config,
) -> Result<LibraryMonitor<FileStateStore, PyPiFetcher>, Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let fetcher = PyPiFetcher::new(config.index_url.clone(), config.timeout())?;
    Ok(LibraryMonitor::new(
        store,
        fetcher,
        PackageRegistry::builtin(),
    )?)
}

fn run_status(
    config: &Config,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::status::{StatusCommand, StatusOptions};

    let state = open_store(config)?.load()?;
    let cmd = StatusCommand::new(state);
    let options = StatusOptions { json, quiet };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

async fn run_check(
    config: &Config,
    json: bool,
    quiet: bool,
    packages: Vec<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::check::{CheckCommand, CheckOptions};

    let mut cmd = CheckCommand::new(build_monitor(config)?);
    let options = CheckOptions {
        json,
        quiet,
        packages,
    };

    let output = cmd.run(&options).await;
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_changes(
    config: &Config,
    days: i64,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::changes::{ChangesCommand, ChangesOptions};

    let state = open_store(config)?.load()?;
    let cmd = ChangesCommand::new(state);
    let options = ChangesOptions { json, quiet, days };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_outdated(
    config: &Config,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::outdated::{OutdatedCommand, OutdatedOptions};

    let state = open_store(config)?.load()?;
    let cmd = OutdatedCommand::new(state);
    let options = OutdatedOptions { json, quiet };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_mark_updated(
    config: &Config,
    package: &str,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::mark::{MarkUpdatedCommand, MarkUpdatedOptions};

    let mut cmd = MarkUpdatedCommand::new(build_monitor(config)?);
    let options = MarkUpdatedOptions { json, quiet };

    let output = cmd.run(package, &options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_learn(
    config: &Config,
    package: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::learn::{LearnCommand, LearnOptions};

    let state = open_store(config)?.load()?;
    let cmd = LearnCommand::new(state);
    let options = LearnOptions {
        json,
        quiet,
        package,
    };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_packages(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::packages::{PackagesCommand, PackagesOptions};

    let cmd = PackagesCommand::new(PackageRegistry::builtin());
    let options = PackagesOptions { json, quiet };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_study(
    config: &Config,
    action: StudyAction,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use libscout::cli::study::{StudyCommand, StudyOptions};

    let mut cmd = StudyCommand::new(build_monitor(config)?);
    let options = StudyOptions { json, quiet };

    let output = match action {
        StudyAction::Start { package, version } => {
            cmd.run_start(&package, version.as_deref(), &options)
        }
        StudyAction::Finish { cards, notes } => cmd.run_finish(cards, notes, &options),
        StudyAction::Show => cmd.run_show(&options),
    };
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

// =============================================================================
// Tests
// =============================================================================
