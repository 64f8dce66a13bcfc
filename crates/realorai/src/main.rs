// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realorai - operator CLI for the daily AI-or-human quiz.
//!
//! Inspects and drives game sessions in the configured key-value store and
//! runs the built-in maintenance jobs.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod jobs;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use realorai_config::RealoraiConfig;

/// Realorai - operator CLI for the daily AI-or-human quiz.
#[derive(Parser, Debug)]
#[command(name = "realorai", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or drive game sessions.
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },
    /// Validate configured jobs or run a built-in one.
    Jobs {
        #[command(subcommand)]
        action: JobsCommand,
    },
    /// Configuration utilities.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum SessionCommand {
    /// Start today's session for a user.
    Create { user_id: String },
    /// Print a stored session.
    Show { user_id: String, session_id: String },
    /// Mark a session completed and lock the user out for the rest of the day.
    Complete { user_id: String, session_id: String },
    /// Report whether a user has already played today.
    Status { user_id: String },
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Validate configured jobs, describe their schedules and show next runs.
    Check,
    /// Run a built-in job once.
    Run {
        #[arg(value_enum)]
        job: BuiltinJob,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BuiltinJob {
    /// Remove keys whose ttl has passed.
    SweepExpired,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate configuration, reporting every problem found.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            realorai_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.app.log_level);
    tracing::debug!(
        app = %config.app.name,
        backend = ?config.store.backend,
        jobs = config.scheduler.jobs.len(),
        "configuration loaded"
    );

    let result = match cli.command {
        Some(Commands::Session { action }) => session::run_session(&config, action, cli.json).await,
        Some(Commands::Jobs { action: JobsCommand::Check }) => {
            jobs::run_jobs_check(&config, cli.json, cli.plain)
        }
        Some(Commands::Jobs {
            action: JobsCommand::Run { job },
        }) => jobs::run_builtin_job(&config, job, cli.json).await,
        Some(Commands::Config {
            action: ConfigCommand::Check,
        }) => {
            println!(
                "realorai: config ok (app.name={}, store.backend={:?})",
                config.app.name, config.store.backend
            );
            Ok(())
        }
        None => {
            println!("realorai: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("realorai: [{}] {e}", e.code());
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<RealoraiConfig, Vec<realorai_config::ConfigError>> {
    match path {
        Some(path) => realorai_config::load_and_validate_path(path),
        None => realorai_config::load_and_validate(),
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `app.log_level`.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("realorai={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
