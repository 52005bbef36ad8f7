//! `[log]` section
//!
//! ```toml
//! [log]
//! level = "info,stargaze_sinks=debug"
//! format = "json"
//! ```
//!
//! `level` is handed to `tracing_subscriber::EnvFilter` as-is, so it takes
//! either a bare level or a comma-separated list of `target=level`
//! directives. `--log-level` on the command line replaces it.

use serde::Deserialize;

/// Filter used when `level` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log line format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Console,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives (e.g. `warn,stargaze_connectors=debug`)
    pub level: String,

    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::Console,
        }
    }
}

impl LogConfig {
    /// Filter directives with surrounding whitespace removed
    pub fn filter(&self) -> &str {
        self.level.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_logs_info_to_console() {
        let config: LogConfig = toml::from_str("").unwrap();
        assert_eq!(config.filter(), "info");
        assert_eq!(config.format, LogFormat::Console);
    }

    #[test]
    fn test_level_keeps_per_target_directives() {
        let toml = r#"
level = " warn,stargaze_sinks=debug "
format = "json"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.filter(), "warn,stargaze_sinks=debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(toml::from_str::<LogConfig>("format = \"xml\"").is_err());
    }
}
