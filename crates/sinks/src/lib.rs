//! Stargaze - Sinks
//!
//! Persists repository measurement points into a time-series store.
//!
//! # Architecture
//!
//! ```text
//! [Collector] --points--> [Writer] --ready?--> [MetricsStore]
//!                            |
//!                            +--not ready--> [SchemaManager::ensure_ready] (batch dropped)
//! ```
//!
//! - `MetricsStore` is the store capability (list/create database, batch write)
//! - `InfluxStore` implements it over the InfluxDB 1.x HTTP API
//! - `SchemaManager` owns the process-wide readiness flag
//! - `Writer` turns one cycle's points into a single batched write and
//!   reports a `WriteOutcome`

/// InfluxDB HTTP store and line-protocol encoding
pub mod influx;

/// Schema readiness tracking
pub mod schema;

/// Test helpers (in-memory store with call counters and failure injection)
pub mod test_utils;

mod error;
mod metrics;
mod store;
mod writer;

pub use error::{SchemaInitError, StoreError};
pub use influx::{InfluxConfig, InfluxStore};
pub use metrics::{WriterMetrics, WriterMetricsSnapshot};
pub use schema::{Readiness, SchemaManager};
pub use store::MetricsStore;
pub use writer::{WriteOutcome, Writer};
