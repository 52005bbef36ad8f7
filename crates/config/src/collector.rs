//! Collector schedule and search configuration
//!
//! # Example
//!
//! ```toml
//! [collector]
//! search_filter = "stars:>1000"
//! page_size = 10
//! interval = "5m"
//! overlap = "allow"   # or "skip"
//! ```

use std::time::Duration;

use serde::Deserialize;

/// What to do when a tick fires while a previous cycle is still in flight
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Start the new cycle anyway; cycles may run concurrently (default)
    #[default]
    Allow,
    /// Skip the tick while a cycle is in flight
    Skip,
}

/// Collector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorSection {
    /// Search expression passed verbatim to the GitHub search API
    /// Default: stars:>1000
    pub search_filter: String,

    /// Results requested per page
    /// Default: 10
    pub page_size: u32,

    /// Time between fetch cycles
    /// Default: 5m
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Overlapping cycle behaviour
    /// Default: allow
    pub overlap: OverlapPolicy,
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            search_filter: "stars:>1000".to_string(),
            page_size: 10,
            interval: Duration::from_secs(300),
            overlap: OverlapPolicy::Allow,
        }
    }
}
