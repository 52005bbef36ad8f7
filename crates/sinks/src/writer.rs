//! Batch writer
//!
//! Writes one cycle's points as a single batch. When the schema is not yet
//! ready the batch is dropped (not queued) and a readiness check is kicked
//! off instead, so the next cycle's batch can land.

use std::sync::Arc;

use stargaze_protocol::MeasurementPoint;
use tracing::{debug, error, info, warn};

use crate::error::{SchemaInitError, StoreError};
use crate::metrics::WriterMetrics;
use crate::schema::{Readiness, SchemaManager};
use crate::store::MetricsStore;

/// What happened to a batch handed to `Writer::store`
#[derive(Debug)]
pub enum WriteOutcome {
    /// All points were accepted
    Written { points: usize },

    /// Schema was not ready; the batch was dropped and a readiness check ran
    Dropped {
        points: usize,
        readiness: Result<Readiness, SchemaInitError>,
    },

    /// The store rejected the batch
    ///
    /// `recheck` holds the schema check run after the failure; it is `None`
    /// for data errors, which say nothing about the schema.
    Failed {
        points: usize,
        error: StoreError,
        recheck: Option<Result<Readiness, SchemaInitError>>,
    },
}

impl WriteOutcome {
    /// Whether the batch was persisted
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    /// Number of points in the batch
    pub fn points(&self) -> usize {
        match self {
            Self::Written { points } | Self::Dropped { points, .. } | Self::Failed { points, .. } => {
                *points
            }
        }
    }
}

/// Writes measurement points to the metrics store
pub struct Writer {
    schema: Arc<SchemaManager>,
    store: Arc<dyn MetricsStore>,
    measurement: String,
    metrics: Arc<WriterMetrics>,
}

impl Writer {
    /// Create a writer for `measurement`
    pub fn new(
        schema: Arc<SchemaManager>,
        store: Arc<dyn MetricsStore>,
        measurement: impl Into<String>,
    ) -> Self {
        Self {
            schema,
            store,
            measurement: measurement.into(),
            metrics: Arc::new(WriterMetrics::new()),
        }
    }

    /// Target measurement
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Schema manager this writer defers to
    pub fn schema(&self) -> &Arc<SchemaManager> {
        &self.schema
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &WriterMetrics {
        &self.metrics
    }

    /// Write a batch of points
    ///
    /// Never retries: a dropped or failed batch is gone, and the next cycle's
    /// batch is an independent attempt. The outcome is logged once here and
    /// returned for callers that want to observe it.
    pub async fn store(&self, points: &[MeasurementPoint]) -> WriteOutcome {
        let count = points.len();
        if count == 0 {
            debug!(measurement = %self.measurement, "empty batch, nothing to write");
            return WriteOutcome::Written { points: 0 };
        }

        if !self.schema.is_ready() {
            let readiness = self.schema.ensure_ready().await;
            self.metrics.record_batch_dropped(count as u64);
            warn!(
                database = %self.schema.database(),
                measurement = %self.measurement,
                points = count,
                schema_ready = readiness.is_ok(),
                "schema not ready, dropped batch"
            );
            return WriteOutcome::Dropped {
                points: count,
                readiness,
            };
        }

        match self.store.write_batch(&self.measurement, points).await {
            Ok(()) => {
                self.metrics.record_batch_written(count as u64);
                info!(
                    measurement = %self.measurement,
                    points = count,
                    "wrote batch"
                );
                WriteOutcome::Written { points: count }
            }
            Err(e) => {
                self.metrics.record_error();
                error!(
                    measurement = %self.measurement,
                    points = count,
                    error = %e,
                    "batch write failed"
                );
                let recheck = if e.is_data_error() {
                    None
                } else {
                    Some(self.schema.recheck().await)
                };
                WriteOutcome::Failed {
                    points: count,
                    error: e,
                    recheck,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;
