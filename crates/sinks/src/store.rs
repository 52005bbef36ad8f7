//! Metrics store capability

use async_trait::async_trait;
use stargaze_protocol::MeasurementPoint;

use crate::error::StoreError;

/// Time-series store the writer persists points into
///
/// A store is bound to one target database at construction. Implementations
/// are shared across concurrently running cycles, so every method takes
/// `&self`.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Target database name
    fn database(&self) -> &str;

    /// Names of the databases that currently exist
    async fn list_databases(&self) -> Result<Vec<String>, StoreError>;

    /// Create a database
    async fn create_database(&self, name: &str) -> Result<(), StoreError>;

    /// Write all points of a batch into `measurement` in a single request
    ///
    /// A batch that is partly rejected fails as a whole with one aggregate
    /// error.
    async fn write_batch(
        &self,
        measurement: &str,
        points: &[MeasurementPoint],
    ) -> Result<(), StoreError>;
}
