//! Schema readiness
//!
//! `SchemaManager` makes sure the target database exists before anything is
//! written. Readiness starts out false and flips to true only after a
//! confirmed exists-or-created round trip; it never flips back on its own.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::error::SchemaInitError;
use crate::store::MetricsStore;

/// Result of a readiness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Already confirmed earlier, no round trip made
    AlreadyReady,
    /// Database existed
    Found,
    /// Database was created
    Created,
}

/// Owner of the process-wide schema readiness flag
///
/// Safe to share between overlapping cycles: concurrent `ensure_ready` calls
/// may each perform a round trip, and every one that succeeds leaves the
/// flag set.
pub struct SchemaManager {
    store: Arc<dyn MetricsStore>,
    ready: AtomicBool,
}

impl SchemaManager {
    /// Create a manager for the store's target database
    pub fn new(store: Arc<dyn MetricsStore>) -> Self {
        Self {
            store,
            ready: AtomicBool::new(false),
        }
    }

    /// Target database name
    pub fn database(&self) -> &str {
        self.store.database()
    }

    /// Whether the database is confirmed to exist
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Make sure the target database exists
    ///
    /// Returns immediately without a round trip once ready.
    ///
    /// # Errors
    ///
    /// Returns `SchemaInitError` if the existence check or creation fails;
    /// readiness stays false and the failure is logged.
    pub async fn ensure_ready(&self) -> Result<Readiness, SchemaInitError> {
        if self.is_ready() {
            return Ok(Readiness::AlreadyReady);
        }
        self.check().await
    }

    /// Repeat the existence check even when already ready
    ///
    /// Used after a failed write. Recreates the database if it disappeared;
    /// a failure here leaves the flag untouched.
    pub async fn recheck(&self) -> Result<Readiness, SchemaInitError> {
        self.check().await
    }

    async fn check(&self) -> Result<Readiness, SchemaInitError> {
        let database = self.store.database();

        let existing = self.store.list_databases().await.map_err(|e| {
            warn!(database = %database, error = %e, "database existence check failed");
            SchemaInitError::List(e)
        })?;

        let readiness = if existing.iter().any(|name| name == database) {
            debug!(database = %database, "database exists");
            Readiness::Found
        } else {
            self.store.create_database(database).await.map_err(|e| {
                warn!(database = %database, error = %e, "failed to create database");
                SchemaInitError::Create {
                    database: database.to_string(),
                    source: e,
                }
            })?;
            info!(database = %database, "created database");
            Readiness::Created
        };

        if !self.ready.swap(true, Ordering::AcqRel) {
            info!(database = %database, ?readiness, "schema ready");
        }

        Ok(readiness)
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;
