//! Validated collector configuration
//!
//! `CollectorConfig` is the runtime form of the `[collector]` section.
//! Construction rejects values that would make every cycle fail.

use std::time::Duration;

use stargaze_config::{CollectorSection, OverlapPolicy};

use crate::error::ConnectorError;

/// Search and schedule parameters for a `Collector`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    search_filter: String,
    page_size: u32,
    interval: Duration,
    overlap: OverlapPolicy,
}

impl CollectorConfig {
    /// Create a config with the default overlap policy
    ///
    /// # Errors
    ///
    /// Returns `ConnectorError::Config` if the filter is blank, or the page
    /// size or interval is zero.
    pub fn new(
        search_filter: impl Into<String>,
        page_size: u32,
        interval: Duration,
    ) -> Result<Self, ConnectorError> {
        let search_filter = search_filter.into();
        if search_filter.trim().is_empty() {
            return Err(ConnectorError::Config("search filter is empty".into()));
        }
        if page_size == 0 {
            return Err(ConnectorError::Config("page size must be positive".into()));
        }
        if interval.is_zero() {
            return Err(ConnectorError::Config("interval must be positive".into()));
        }

        Ok(Self {
            search_filter,
            page_size,
            interval,
            overlap: OverlapPolicy::default(),
        })
    }

    /// Build from the `[collector]` config section
    ///
    /// # Errors
    ///
    /// Same as [`CollectorConfig::new`].
    pub fn from_section(section: &CollectorSection) -> Result<Self, ConnectorError> {
        Ok(Self::new(section.search_filter.clone(), section.page_size, section.interval)?
            .with_overlap(section.overlap))
    }

    /// Set the overlap policy
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn search_filter(&self) -> &str {
        &self.search_filter
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }
}
