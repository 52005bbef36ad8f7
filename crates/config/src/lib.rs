//! Stargaze Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use stargaze_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[collector]\nsearch_filter = \"language:rust\"").unwrap();
//! assert_eq!(config.collector.search_filter, "language:rust");
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [github]
//! token = "ghp_xxx"
//!
//! [collector]
//! search_filter = "stars:>1000"
//! page_size = 10
//! interval = "5m"
//!
//! [database]
//! host = "localhost"
//! port = 8086
//! name = "github"
//! measurement = "repositories"
//!
//! [log]
//! level = "info"
//! ```

mod collector;
mod database;
mod error;
mod github;
mod logging;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use collector::{CollectorSection, OverlapPolicy};
pub use database::DatabaseConfig;
pub use error::{ConfigError, Result};
pub use github::{GITHUB_TOKEN_ENV, GitHubConfig};
pub use logging::{DEFAULT_LOG_FILTER, LogConfig, LogFormat};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub GraphQL API settings
    pub github: GitHubConfig,

    /// Search and schedule settings
    pub collector: CollectorSection,

    /// Metrics store settings
    pub database: DatabaseConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.collector.page_size, 10);
        assert_eq!(config.database.port, 8086);
        assert_eq!(config.log.filter(), "info");
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[github]
api_url = "https://api.github.com/graphql"
token = "ghp_test"
timeout = "15s"

[collector]
search_filter = "language:rust stars:>500"
page_size = 25
interval = "10m"
overlap = "skip"

[database]
host = "influx"
port = 8087
name = "gh"
measurement = "repos"
username = "u"
password = "p"

[log]
level = "debug"
format = "json"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.github.timeout, Duration::from_secs(15));
        assert_eq!(config.collector.search_filter, "language:rust stars:>500");
        assert_eq!(config.collector.page_size, 25);
        assert_eq!(config.collector.interval, Duration::from_secs(600));
        assert_eq!(config.collector.overlap, OverlapPolicy::Skip);
        assert_eq!(config.database.url(), "http://influx:8087");
        assert_eq!(config.database.name, "gh");
        assert_eq!(config.database.measurement, "repos");
        assert_eq!(config.log.filter(), "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_str("[collector\npage_size = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = Config::from_str("[collector]\npage_size = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[collector]\npage_size = 50").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.collector.page_size, 50);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
