//! GitHub GraphQL API configuration
//!
//! # Example
//!
//! ```toml
//! [github]
//! api_url = "https://api.github.com/graphql"
//! token = "ghp_xxx"   # optional, falls back to $GITHUB_TOKEN
//! timeout = "30s"
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Environment variable consulted when no token is configured
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GraphQL endpoint
    /// Default: https://api.github.com/graphql
    pub api_url: String,

    /// Bearer token attached to every request
    pub token: Option<String>,

    /// Per-request timeout
    /// Default: 30s
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com/graphql".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GitHubConfig {
    /// Configured token, or `$GITHUB_TOKEN` when unset
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var(GITHUB_TOKEN_ENV).ok())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GitHubConfig::default();
        assert_eq!(config.api_url, "https://api.github.com/graphql");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
api_url = "https://github.example.com/api/graphql"
token = "ghp_test"
timeout = "10s"
"#;
        let config: GitHubConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_url, "https://github.example.com/api/graphql");
        assert_eq!(config.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_configured_token_wins() {
        let config = GitHubConfig {
            token: Some("ghp_configured".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_token().as_deref(), Some("ghp_configured"));
    }

    #[test]
    fn test_empty_token_is_none() {
        let config = GitHubConfig {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(config.resolved_token().is_none());
    }
}
