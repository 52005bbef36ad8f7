//! Writer metrics
//!
//! Atomic counters for tracking writer throughput and health.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for the batch writer
#[derive(Debug, Default)]
pub struct WriterMetrics {
    /// Batches written successfully
    pub batches_written: AtomicU64,

    /// Points written successfully
    pub points_written: AtomicU64,

    /// Batches dropped because the schema was not ready
    pub batches_dropped: AtomicU64,

    /// Points dropped because the schema was not ready
    pub points_dropped: AtomicU64,

    /// Failed batch writes
    pub write_errors: AtomicU64,
}

impl WriterMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            batches_written: AtomicU64::new(0),
            points_written: AtomicU64::new(0),
            batches_dropped: AtomicU64::new(0),
            points_dropped: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    /// Record a batch written
    #[inline]
    pub fn record_batch_written(&self, points: u64) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.points_written.fetch_add(points, Ordering::Relaxed);
    }

    /// Record a batch dropped
    #[inline]
    pub fn record_batch_dropped(&self, points: u64) {
        self.batches_dropped.fetch_add(1, Ordering::Relaxed);
        self.points_dropped.fetch_add(points, Ordering::Relaxed);
    }

    /// Record a write error
    #[inline]
    pub fn record_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of metrics
    pub fn snapshot(&self) -> WriterMetricsSnapshot {
        WriterMetricsSnapshot {
            batches_written: self.batches_written.load(Ordering::Relaxed),
            points_written: self.points_written.load(Ordering::Relaxed),
            batches_dropped: self.batches_dropped.load(Ordering::Relaxed),
            points_dropped: self.points_dropped.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of writer metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterMetricsSnapshot {
    pub batches_written: u64,
    pub points_written: u64,
    pub batches_dropped: u64,
    pub points_dropped: u64,
    pub write_errors: u64,
}
