//! In-memory metrics store for tests
//!
//! `MemoryStore` records every call so tests can assert on round trips
//! instead of mocking. Failures and latency can be injected to exercise the
//! schema and writer error paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use stargaze_protocol::MeasurementPoint;

use crate::error::StoreError;
use crate::store::MetricsStore;

/// Failure returned by `write_batch` when injected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFailure {
    /// Store unreachable; nothing is written
    Unavailable,
    /// The last `rejected` points of each batch are rejected, the rest land
    PartialWrite { rejected: usize },
}

/// One accepted batch
#[derive(Debug, Clone)]
pub struct WrittenBatch {
    pub measurement: String,
    pub points: Vec<MeasurementPoint>,
}

/// In-memory `MetricsStore`
pub struct MemoryStore {
    database: String,
    databases: Mutex<Vec<String>>,
    batches: Mutex<Vec<WrittenBatch>>,
    latency: Duration,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    write_failure: Mutex<Option<WriteFailure>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl MemoryStore {
    /// Store targeting `database`, which does not exist yet
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            databases: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            fail_list: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            write_failure: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    /// Store whose target database already exists
    pub fn with_existing(database: impl Into<String>) -> Self {
        let store = Self::new(database);
        store.databases.lock().push(store.database.clone());
        store
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make `list_databases` fail
    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Make `create_database` fail
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Make `write_batch` fail
    pub fn set_write_failure(&self, failure: Option<WriteFailure>) {
        *self.write_failure.lock() = failure;
    }

    /// Forget a database, as if it was dropped out-of-band
    pub fn drop_database(&self, name: &str) {
        self.databases.lock().retain(|d| d != name);
    }

    /// Databases that currently exist
    pub fn databases(&self) -> Vec<String> {
        self.databases.lock().clone()
    }

    /// Accepted batches, in write order
    pub fn batches(&self) -> Vec<WrittenBatch> {
        self.batches.lock().clone()
    }

    /// All accepted points, in write order
    pub fn points(&self) -> Vec<MeasurementPoint> {
        self.batches
            .lock()
            .iter()
            .flat_map(|b| b.points.iter().cloned())
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        message: "store unavailable".into(),
    }
}

#[async_trait]
impl MetricsStore for MemoryStore {
    fn database(&self) -> &str {
        &self.database
    }

    async fn list_databases(&self) -> Result<Vec<String>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.databases())
    }

    async fn create_database(&self, name: &str) -> Result<(), StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut databases = self.databases.lock();
        if !databases.iter().any(|d| d == name) {
            databases.push(name.to_string());
        }
        Ok(())
    }

    async fn write_batch(
        &self,
        measurement: &str,
        points: &[MeasurementPoint],
    ) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;

        let failure = *self.write_failure.lock();
        match failure {
            Some(WriteFailure::Unavailable) => Err(unavailable()),
            Some(WriteFailure::PartialWrite { rejected }) => {
                let accepted = points.len().saturating_sub(rejected);
                self.batches.lock().push(WrittenBatch {
                    measurement: measurement.to_string(),
                    points: points[..accepted].to_vec(),
                });
                Err(StoreError::PartialWrite(format!(
                    "points beyond storage retention dropped={}",
                    points.len() - accepted
                )))
            }
            None => {
                self.batches.lock().push(WrittenBatch {
                    measurement: measurement.to_string(),
                    points: points.to_vec(),
                });
                Ok(())
            }
        }
    }
}
