//! InfluxDB HTTP store

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use stargaze_protocol::MeasurementPoint;
use tracing::debug;

use super::config::InfluxConfig;
use super::line_protocol::encode_batch;
use crate::error::StoreError;
use crate::store::MetricsStore;

/// `MetricsStore` backed by an InfluxDB 1.x server
pub struct InfluxStore {
    config: InfluxConfig,
    client: reqwest::Client,
}

impl InfluxStore {
    /// Create a store from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the database name is empty or the HTTP client cannot
    /// be built (e.g., TLS misconfiguration)
    pub fn new(config: InfluxConfig) -> Result<Self, StoreError> {
        if config.database.is_empty() {
            return Err(StoreError::Config("database name is required".into()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("stargaze/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("influx HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get reference to config
    pub fn config(&self) -> &InfluxConfig {
        &self.config
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.username {
            Some(ref username) => request.basic_auth(username, self.config.password.as_ref()),
            None => request,
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> StoreError {
        if error.is_timeout() {
            StoreError::Timeout(self.config.timeout)
        } else {
            StoreError::Http(error)
        }
    }

    /// Run a statement against `/query` and return its first result
    async fn query(&self, statement: &str, post: bool) -> Result<StatementResult, StoreError> {
        let url = self.config.endpoint("query");
        let request = if post {
            self.client.post(&url).form(&[("q", statement)])
        } else {
            self.client.get(&url).query(&[("q", statement)])
        };

        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: QueryResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidResponse(format!("query response: {}", e)))?;

        if let Some(error) = parsed.error {
            return Err(StoreError::Query(error));
        }

        let result = parsed.results.into_iter().next().unwrap_or_default();
        if let Some(error) = result.error {
            return Err(StoreError::Query(error));
        }

        Ok(result)
    }
}

#[async_trait]
impl MetricsStore for InfluxStore {
    fn database(&self) -> &str {
        &self.config.database
    }

    async fn list_databases(&self) -> Result<Vec<String>, StoreError> {
        let result = self.query("SHOW DATABASES", false).await?;

        let names = result
            .series
            .into_iter()
            .flat_map(|s| s.values)
            .filter_map(|row| row.into_iter().next())
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();

        Ok(names)
    }

    async fn create_database(&self, name: &str) -> Result<(), StoreError> {
        let statement = format!("CREATE DATABASE \"{}\"", name.replace('"', "\\\""));
        self.query(&statement, true).await?;
        debug!(database = %name, "created database");
        Ok(())
    }

    async fn write_batch(
        &self,
        measurement: &str,
        points: &[MeasurementPoint],
    ) -> Result<(), StoreError> {
        if points.is_empty() {
            return Ok(());
        }

        let body = encode_batch(measurement, points);
        let request = self
            .client
            .post(self.config.endpoint("write"))
            .query(&[("db", self.config.database.as_str()), ("precision", "ms")])
            .body(body);

        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

/// Map a non-success response to a `StoreError`
fn status_error(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.trim().to_string());

    if message.starts_with("partial write") {
        return StoreError::PartialWrite(message);
    }

    StoreError::Status {
        status: status.as_u16(),
        message,
    }
}

// --- API Response Types ---

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `/query` response
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatementResult {
    #[serde(default)]
    series: Vec<Series>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}
