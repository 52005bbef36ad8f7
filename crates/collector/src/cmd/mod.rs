//! Subcommands and the wiring they share

pub mod pull;
pub mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use stargaze_config::{Config, DatabaseConfig};
use stargaze_connectors::GitHub;
use stargaze_sinks::{InfluxConfig, InfluxStore, MetricsStore, SchemaManager, Writer};

/// Paths tried, in order, when no `--config` is given
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/config.toml", "config.toml"];

/// Load configuration
///
/// An explicit path must exist. Without one, the default paths are tried
/// and built-in defaults are used when none exists. Returns the path the
/// config came from, if any.
pub fn load_config(path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        let config = Config::from_file(path).context("failed to load configuration")?;
        return Ok((config, Some(path.to_path_buf())));
    }

    for candidate in DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from) {
        if candidate.exists() {
            let config = Config::from_file(&candidate).context("failed to load configuration")?;
            return Ok((config, Some(candidate)));
        }
    }

    Ok((Config::default(), None))
}

/// GitHub client from the `[github]` section
pub fn build_client(config: &Config) -> Result<Arc<GitHub>> {
    let client = GitHub::from_config(&config.github).context("failed to create GitHub client")?;
    if config.github.resolved_token().is_none() {
        tracing::warn!("no GitHub token configured, requests will likely be rejected");
    }
    Ok(Arc::new(client))
}

/// Writer over an InfluxDB store from the `[database]` section
pub fn build_writer(config: &Config) -> Result<Arc<Writer>> {
    let db = &config.database;
    let store: Arc<dyn MetricsStore> = Arc::new(
        InfluxStore::new(influx_config(db)).context("failed to create InfluxDB store")?,
    );
    let schema = Arc::new(SchemaManager::new(Arc::clone(&store)));

    Ok(Arc::new(Writer::new(schema, store, db.measurement.clone())))
}

/// Store settings from the `[database]` section
///
/// A username without a password still authenticates (empty password). A
/// password without a username cannot be sent and is ignored with a warning.
fn influx_config(db: &DatabaseConfig) -> InfluxConfig {
    let influx = InfluxConfig::default()
        .with_url(db.url())
        .with_database(db.name.clone())
        .with_timeout(db.timeout);

    match (&db.username, &db.password) {
        (Some(username), Some(password)) => influx.with_credentials(username.clone(), password.clone()),
        (Some(username), None) => influx.with_username(username.clone()),
        (None, Some(_)) => {
            tracing::warn!("database password set without a username, sending no credentials");
            influx
        }
        (None, None) => influx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_influx_config_carries_full_credentials() {
        let db = DatabaseConfig {
            username: Some("writer".into()),
            password: Some("secret".into()),
            ..Default::default()
        };
        let influx = influx_config(&db);
        assert_eq!(influx.username.as_deref(), Some("writer"));
        assert_eq!(influx.password.as_deref(), Some("secret"));
        assert_eq!(influx.database, "github");
    }

    #[test]
    fn test_influx_config_keeps_username_without_password() {
        let db = DatabaseConfig {
            username: Some("reader".into()),
            ..Default::default()
        };
        let influx = influx_config(&db);
        assert_eq!(influx.username.as_deref(), Some("reader"));
        assert_eq!(influx.password, None);
    }

    #[test]
    fn test_influx_config_ignores_password_without_username() {
        let db = DatabaseConfig {
            password: Some("secret".into()),
            ..Default::default()
        };
        let influx = influx_config(&db);
        assert_eq!(influx.username, None);
        assert_eq!(influx.password, None);
    }
}
