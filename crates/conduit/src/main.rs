//! Conduit - resolve, check and inspect pipeline parameters
//!
//! Main entry point for the Conduit CLI.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;

mod commands;

use commands::{check, config, lengths, matrix, resolve};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Conduit - resolve, check and inspect pipeline parameters
#[derive(Parser)]
#[command(name = "conduit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// User configuration directory (default: platform config dir)
    #[arg(long, global = true, env = "CONDUIT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve $(...) references in a list of params
    Resolve(resolve::ResolveArgs),

    /// Default and validate a list of param declarations
    Check(check::CheckArgs),

    /// Show the length of every array param
    Lengths(lengths::LengthsArgs),

    /// Extract task and result names from a matrix context reference
    Matrix(matrix::MatrixArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = conduit_config::load_config_with_options(None, cli.config_dir.as_deref())?;
    let _guard = init_tracing(&loaded.config, cli.verbose);

    for warning in &loaded.warnings {
        warn!("{warning}");
    }

    let pretty = cli.pretty || loaded.config.pretty_output();
    let ctx = commands::Context {
        pretty,
        config_dir: cli.config_dir,
        loaded,
    };

    match cli.command {
        Commands::Resolve(args) => resolve::run(args, &ctx),
        Commands::Check(args) => check::run(args, &ctx),
        Commands::Lengths(args) => lengths::run(args, &ctx),
        Commands::Matrix(args) => matrix::run(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}

/// Install the stderr layer and, if configured, a daily rolling JSON file.
///
/// The returned guard flushes the file writer and must outlive `main`'s work.
fn init_tracing(config: &conduit_config::ConduitConfig, verbose: bool) -> Option<WorkerGuard> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose {
        "debug".to_string()
    } else {
        config
            .log_level()
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "info".to_string())
    };
    let filter = format!("conduit={level},conduit_params={level},conduit_config={level},warn");

    let json = config.logging.as_ref().is_some_and(|l| l.json);
    let directory: Option<&Path> = config
        .logging
        .as_ref()
        .and_then(|l| l.directory.as_deref());

    let human = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(EnvFilter::new(&filter))
    });
    let structured = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::new(&filter))
    });

    let (file, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "conduit.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new(
                    "conduit=trace,conduit_params=trace,conduit_config=trace,info",
                ));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(human)
        .with(structured)
        .with(file)
        .init();

    guard
}
