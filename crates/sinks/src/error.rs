//! Store and schema errors

use std::time::Duration;

/// Errors from the metrics store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP transport error
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("store returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Some points of a batch were rejected; reported once for the whole batch
    #[error("partial write: {0}")]
    PartialWrite(String),

    /// Query statement failed
    #[error("query error: {0}")]
    Query(String),

    /// Response body could not be understood
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether the failure is about the data itself rather than the store
    ///
    /// Rejected points will be rejected again, so they never warrant a
    /// readiness re-check.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::PartialWrite(_))
    }
}

/// Schema existence check or creation failed
///
/// Non-fatal: readiness stays false and the next write attempts again.
#[derive(Debug, thiserror::Error)]
pub enum SchemaInitError {
    /// Listing existing databases failed
    #[error("failed to list databases: {0}")]
    List(#[source] StoreError),

    /// Creating the target database failed
    #[error("failed to create database '{database}': {source}")]
    Create {
        database: String,
        #[source]
        source: StoreError,
    },
}
