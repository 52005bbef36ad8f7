//! Periodic repository collector
//!
//! One fetch cycle: build the search request, execute it, map the page,
//! derive points and hand them to the writer as one batch. `run_forever`
//! repeats that on the configured interval, always from the first page.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use stargaze_protocol::{Cursor, MeasurementPoint};
use stargaze_sinks::{WriteOutcome, Writer};
use tracing::{debug, info, warn};

use crate::config::CollectorConfig;
use crate::error::ConnectorError;
use crate::mapper::{self, MappedPage};
use crate::query;
use crate::scheduler::IntervalScheduler;
use crate::traits::GraphQlClient;

/// Result of one completed fetch cycle
#[derive(Debug)]
pub struct CycleReport {
    /// Cursor of the last result on the page, if any
    pub cursor: Option<Cursor>,
    /// Records mapped from the page
    pub records: usize,
    /// What the writer did with the batch
    pub write: WriteOutcome,
}

/// Drives fetch cycles against a GraphQL client and a writer
pub struct Collector {
    config: CollectorConfig,
    client: Arc<dyn GraphQlClient>,
    writer: Arc<Writer>,
    cycles: AtomicU64,
}

impl Collector {
    pub fn new(config: CollectorConfig, client: Arc<dyn GraphQlClient>, writer: Arc<Writer>) -> Self {
        Self {
            config,
            client,
            writer,
            cycles: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn writer(&self) -> &Arc<Writer> {
        &self.writer
    }

    /// Fetch and map one page without writing anything
    ///
    /// # Errors
    ///
    /// Propagates client errors and `MalformedResponse` from mapping.
    pub async fn fetch_page(&self, after: Option<&Cursor>) -> Result<MappedPage, ConnectorError> {
        let request = query::build(self.config.search_filter(), self.config.page_size(), after);
        let data = self.client.execute(&request).await?;
        mapper::map(&data)
    }

    /// Run one fetch cycle: fetch, map, derive points, write
    ///
    /// All points of the cycle share one timestamp. The write outcome is
    /// reported, not raised: only fetch and mapping failures are errors, and
    /// in that case nothing is written.
    ///
    /// # Errors
    ///
    /// Same as [`Collector::fetch_page`].
    pub async fn fetch_cycle(&self, after: Option<&Cursor>) -> Result<CycleReport, ConnectorError> {
        let page = self.fetch_page(after).await?;

        let timestamp_ms = Utc::now().timestamp_millis();
        let points = MeasurementPoint::from_records(&page.records, timestamp_ms);
        for record in &page.records {
            debug!(
                repository = %record.full_name(),
                stars = record.stargazer_count,
                forks = record.fork_count,
                "mapped repository"
            );
        }

        let write = self.writer.store(&points).await;

        Ok(CycleReport {
            cursor: page.last_cursor,
            records: page.records.len(),
            write,
        })
    }

    /// Run fetch cycles on the configured interval, forever
    ///
    /// The first cycle starts immediately. Every cycle queries the first
    /// page; the cursor a cycle returns is logged, never fed to the next.
    /// A failed cycle is logged and does not stop the schedule.
    pub async fn run_forever(self: Arc<Self>) {
        let scheduler = IntervalScheduler::new(self.config.interval(), self.config.overlap());

        info!(
            client = self.client.name(),
            filter = %self.config.search_filter(),
            page_size = self.config.page_size(),
            measurement = %self.writer.measurement(),
            "starting collector"
        );

        scheduler
            .run(move || {
                let collector = Arc::clone(&self);
                async move { collector.run_cycle().await }
            })
            .await
    }

    async fn run_cycle(&self) {
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;

        match self.fetch_cycle(None).await {
            Ok(report) => info!(
                cycle,
                records = report.records,
                written = report.write.is_written(),
                cursor = report.cursor.as_ref().map(Cursor::as_str).unwrap_or_default(),
                "fetch cycle complete"
            ),
            Err(e) => warn!(
                cycle,
                error = %e,
                transient = e.is_transient(),
                "fetch cycle failed"
            ),
        }
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod collector_test;
