//! Timeouts for outbound requests
//!
//! A fetch cycle makes exactly one attempt; there is no retry or circuit
//! breaking here. The next scheduled tick is the retry.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::ConnectorError;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default request timeout as a `Duration`
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// Bound an operation by `limit`, mapping expiry to `ConnectorError::Timeout`
pub async fn with_timeout<F, T>(limit: Duration, operation: F) -> Result<T, ConnectorError>
where
    F: Future<Output = Result<T, ConnectorError>>,
{
    match timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(ConnectorError::Timeout(limit)),
    }
}
