//! Stargaze - GitHub repository statistics collector
//!
//! # Usage
//!
//! ```bash
//! # Run the collector (default)
//! stargaze
//! stargaze --config configs/config.toml
//!
//! # Fetch and print search results without writing
//! stargaze pull
//! stargaze pull --filter "language:rust stars:>5000" --pages 3
//! ```

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stargaze_config::{DEFAULT_LOG_FILTER, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Stargaze - GitHub repository statistics collector
#[derive(Parser, Debug)]
#[command(name = "stargaze")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (defaults to configs/config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (a level or EnvFilter directives), overrides [log] level
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the collector on its interval
    Serve(cmd::serve::ServeArgs),

    /// Fetch search results and print them as JSON
    Pull(cmd::pull::PullArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = cmd::load_config(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or_else(|| config.log.filter());
    init_logging(level, config.log.format)?;

    match &config_path {
        Some(path) => tracing::info!(config = %path.display(), "using config file"),
        None => tracing::info!("no config file found, using defaults"),
    }

    match cli.command {
        Some(Command::Serve(args)) => cmd::serve::run(args, config).await,
        Some(Command::Pull(args)) => cmd::pull::run(args, config).await,
        // No subcommand = run collector (default behavior)
        None => cmd::serve::run(cmd::serve::ServeArgs::default(), config).await,
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    match format {
        LogFormat::Console => tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .with(filter)
            .init(),
    }

    Ok(())
}
