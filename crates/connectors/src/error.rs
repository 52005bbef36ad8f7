//! Error types for connectors

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while collecting
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Failed to initialize the client (e.g., HTTP client creation failed)
    #[error("failed to initialize connector: {0}")]
    Init(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with GraphQL errors
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    /// Response is missing structurally required data
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// API rate limited
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Request exceeded its timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid construction arguments
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConnectorError {
    /// Whether a later attempt may succeed
    ///
    /// Malformed responses are data-contract violations and configuration
    /// errors are fatal at startup; everything else is a remote hiccup.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::MalformedResponse(_) | Self::Config(_))
    }
}
