//! GitHub GraphQL client
//!
//! Posts search requests to the GitHub GraphQL endpoint and unwraps the
//! response envelope into its `data` payload.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ConnectorError;
use crate::query::SearchRequest;
use crate::resilience::{DEFAULT_TIMEOUT, with_timeout};
use crate::traits::GraphQlClient;

/// Default GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

/// Retry hint used when a rate-limited response carries no `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// GitHub client configuration (simple version for CLI and tests)
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Bearer token (optional, anonymous requests are rejected by the API)
    pub token: Option<String>,
    /// GraphQL endpoint (default: https://api.github.com/graphql)
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// GitHub GraphQL client
pub struct GitHub {
    token: Option<String>,
    api_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GitHub {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails (e.g., TLS or proxy misconfiguration)
    pub fn new(config: GitHubConfig) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stargaze/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConnectorError::Init(format!("GitHub HTTP client: {}", e)))?;

        Ok(Self {
            token: config.token,
            api_url: config.api_url,
            timeout: config.timeout,
            client,
        })
    }

    /// Create a client from the `[github]` config section
    ///
    /// The token falls back to `$GITHUB_TOKEN` when the section has none.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails
    pub fn from_config(config: &stargaze_config::GitHubConfig) -> Result<Self, ConnectorError> {
        Self::new(GitHubConfig {
            token: config.resolved_token(),
            api_url: config.api_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Create a client with a token against the public endpoint
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails
    pub fn with_token(token: impl Into<String>) -> Result<Self, ConnectorError> {
        Self::new(GitHubConfig {
            token: Some(token.into()),
            ..Default::default()
        })
    }

    /// Endpoint this client posts to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Build a request with optional auth
    fn build_request(&self) -> reqwest::RequestBuilder {
        let mut request = self.client.post(&self.api_url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Map a non-success response to an error
    fn handle_error_status(&self, response: reqwest::Response) -> ConnectorError {
        let status = response.status();
        let rate_limit_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                ConnectorError::RateLimited { retry_after_secs }
            }
            reqwest::StatusCode::FORBIDDEN if rate_limit_exhausted => {
                ConnectorError::RateLimited { retry_after_secs }
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                let reason = if self.token.is_some() {
                    "token rejected"
                } else {
                    "missing token"
                };
                ConnectorError::AuthFailed(format!("{} ({})", reason, status))
            }
            _ => match response.error_for_status() {
                Err(e) => ConnectorError::Http(e),
                Ok(_) => ConnectorError::MalformedResponse(format!("unexpected status {}", status)),
            },
        }
    }

    /// Execute a request (single attempt, no timeout wrapper)
    async fn execute_once(&self, request: &SearchRequest) -> Result<Value, ConnectorError> {
        let response = self.build_request().json(request).send().await?;

        if !response.status().is_success() {
            return Err(self.handle_error_status(response));
        }

        let envelope: GraphQlResponse = response.json().await?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ConnectorError::GraphQl(messages.join("; ")));
        }

        match envelope.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(ConnectorError::MalformedResponse(
                "response has no data".to_string(),
            )),
        }
    }
}

#[async_trait]
impl GraphQlClient for GitHub {
    fn name(&self) -> &str {
        "github"
    }

    async fn execute(&self, request: &SearchRequest) -> Result<Value, ConnectorError> {
        debug!(
            client = "github",
            filter = request.filter().unwrap_or_default(),
            after = request.after().unwrap_or_default(),
            "executing search request"
        );
        let result = with_timeout(self.timeout, self.execute_once(request)).await;
        match result {
            Err(ConnectorError::Http(e)) if e.is_timeout() => {
                Err(ConnectorError::Timeout(self.timeout))
            }
            other => other,
        }
    }
}

// =============================================================================
// GraphQL envelope
// =============================================================================

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlErrorItem>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    message: String,
}
