//! Metrics store (InfluxDB) configuration
//!
//! # Example
//!
//! ```toml
//! [database]
//! host = "localhost"
//! port = 8086
//! name = "github"
//! measurement = "repositories"
//! username = "writer"
//! password = "secret"
//! timeout = "30s"
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Host name or address
    /// Default: localhost
    pub host: String,

    /// HTTP API port
    /// Default: 8086
    pub port: u16,

    /// Database created on demand and written to
    /// Default: github
    pub name: String,

    /// Measurement each repository point is written to
    /// Default: repositories
    pub measurement: String,

    /// Username (optional)
    pub username: Option<String>,

    /// Password (optional)
    pub password: Option<String>,

    /// Per-request timeout
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8086,
            name: "github".to_string(),
            measurement: "repositories".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DatabaseConfig {
    /// Base URL of the HTTP API
    pub fn url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            format!("{}:{}", self.host.trim_end_matches('/'), self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url(), "http://localhost:8086");
        assert_eq!(config.name, "github");
        assert_eq!(config.measurement, "repositories");
        assert!(config.username.is_none());
    }

    #[test]
    fn test_url_keeps_explicit_scheme() {
        let config = DatabaseConfig {
            host: "https://influx.internal/".into(),
            port: 8443,
            ..Default::default()
        };
        assert_eq!(config.url(), "https://influx.internal:8443");
    }

    #[test]
    fn test_deserialize_credentials() {
        let toml = r#"
host = "db"
port = 9999
username = "writer"
password = "secret"
"#;
        let config: DatabaseConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.url(), "http://db:9999");
        assert_eq!(config.username.as_deref(), Some("writer"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }
}
