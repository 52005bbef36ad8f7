//! GraphQL client capability

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ConnectorError;
use crate::query::SearchRequest;

/// Executes a GraphQL request and returns its `data` payload
///
/// Implementations own transport, authentication and timeouts. They
/// surface transport failures, non-success statuses and GraphQL `errors`
/// as `ConnectorError`; the returned value is always the `data` object,
/// never the whole envelope.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    /// Client name used in log fields (e.g., "github")
    fn name(&self) -> &str;

    /// Execute one request
    async fn execute(&self, request: &SearchRequest) -> Result<Value, ConnectorError>;
}
