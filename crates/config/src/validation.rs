//! Configuration validation
//!
//! Validates values the collector cannot run without:
//! - Search filter is non-empty
//! - Page size and interval are positive
//! - Database name, measurement, and host are present and port is non-zero
//! - Log filter is non-empty

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_github(config)?;
    validate_collector(config)?;
    validate_database(config)?;
    validate_log(config)?;
    Ok(())
}

fn validate_github(config: &Config) -> Result<()> {
    if config.github.api_url.trim().is_empty() {
        return Err(ConfigError::missing_field("github", "api_url"));
    }
    if config.github.timeout.is_zero() {
        return Err(ConfigError::invalid_value(
            "github",
            "timeout",
            "must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_collector(config: &Config) -> Result<()> {
    let collector = &config.collector;

    if collector.search_filter.trim().is_empty() {
        return Err(ConfigError::missing_field("collector", "search_filter"));
    }
    if collector.page_size == 0 {
        return Err(ConfigError::invalid_value(
            "collector",
            "page_size",
            "must be greater than 0",
        ));
    }
    if collector.interval.is_zero() {
        return Err(ConfigError::invalid_value(
            "collector",
            "interval",
            "must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_database(config: &Config) -> Result<()> {
    let db = &config.database;

    if db.host.trim().is_empty() {
        return Err(ConfigError::missing_field("database", "host"));
    }
    if db.port == 0 {
        return Err(ConfigError::invalid_value(
            "database",
            "port",
            "must be between 1 and 65535",
        ));
    }
    if db.name.trim().is_empty() {
        return Err(ConfigError::missing_field("database", "name"));
    }
    if db.measurement.trim().is_empty() {
        return Err(ConfigError::missing_field("database", "measurement"));
    }
    if db.timeout.is_zero() {
        return Err(ConfigError::invalid_value(
            "database",
            "timeout",
            "must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_log(config: &Config) -> Result<()> {
    if config.log.filter().is_empty() {
        return Err(ConfigError::missing_field("log", "level"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn parse(toml: &str) -> Result<Config> {
        Config::from_str(toml)
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_search_filter_rejected() {
        let err = parse("[collector]\nsearch_filter = \"  \"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "collector",
                field: "search_filter"
            }
        ));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = parse("[collector]\npage_size = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "page_size",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = parse("[collector]\ninterval = \"0s\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "interval",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = parse("[database]\nport = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "port", .. }));
    }

    #[test]
    fn test_empty_measurement_rejected() {
        let err = parse("[database]\nmeasurement = \"\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "database",
                field: "measurement"
            }
        ));
    }

    #[test]
    fn test_empty_database_name_rejected() {
        let err = parse("[database]\nname = \"\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "database",
                field: "name"
            }
        ));
    }

    #[test]
    fn test_empty_api_url_rejected() {
        let err = parse("[github]\napi_url = \"\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "github",
                field: "api_url"
            }
        ));
    }

    #[test]
    fn test_blank_log_level_rejected() {
        let err = parse("[log]\nlevel = \" \"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                section: "log",
                field: "level"
            }
        ));
    }
}
