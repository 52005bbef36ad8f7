//! Serve command - Run the collector on its interval

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use stargaze_config::{Config, OverlapPolicy};
use stargaze_connectors::{Collector, CollectorConfig};
use tokio::signal;
use tracing::{info, warn};

use super::{build_client, build_writer};

/// Serve command arguments
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Skip ticks while a cycle is still running (overrides [collector] overlap)
    #[arg(long)]
    pub skip_overlap: bool,

    /// Run a single fetch cycle and exit
    #[arg(long)]
    pub once: bool,
}

/// Run the serve command
pub async fn run(args: ServeArgs, config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        filter = %config.collector.search_filter,
        page_size = config.collector.page_size,
        interval = ?config.collector.interval,
        database = %config.database.url(),
        "stargaze starting"
    );

    let mut collector_config =
        CollectorConfig::from_section(&config.collector).context("invalid collector settings")?;
    if args.skip_overlap {
        collector_config = collector_config.with_overlap(OverlapPolicy::Skip);
    }

    let client = build_client(&config)?;
    let writer = build_writer(&config)?;

    // Warm up so the first cycle's batch is not dropped
    match writer.schema().ensure_ready().await {
        Ok(readiness) => info!(?readiness, database = %writer.schema().database(), "schema ready"),
        Err(e) => warn!(
            error = %e,
            "schema not ready at startup, first batch will be dropped"
        ),
    }

    let collector = Arc::new(Collector::new(collector_config, client, writer));

    if args.once {
        let report = collector
            .fetch_cycle(None)
            .await
            .context("fetch cycle failed")?;
        info!(
            records = report.records,
            written = report.write.is_written(),
            cursor = ?report.cursor,
            "single cycle complete"
        );
        return Ok(());
    }

    let task = tokio::spawn(Arc::clone(&collector).run_forever());

    wait_for_shutdown().await?;

    info!("shutdown signal received, stopping collector...");
    task.abort();

    let metrics = collector.writer().metrics().snapshot();
    info!(
        batches_written = metrics.batches_written,
        points_written = metrics.points_written,
        batches_dropped = metrics.batches_dropped,
        write_errors = metrics.write_errors,
        "stargaze shutdown complete"
    );
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install signal handler")?;
        tokio::select! {
            result = signal::ctrl_c() => result.context("failed to install Ctrl+C handler")?,
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    signal::ctrl_c()
        .await
        .context("failed to install Ctrl+C handler")?;

    Ok(())
}
