//! Repository record
//!
//! The normalized form of one search result node.

use serde::Serialize;

/// One repository as reported by a search page
///
/// Immutable once constructed. Lives only between the result mapper and
/// the writer; what gets persisted is the `MeasurementPoint` derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    /// Repository name (without owner)
    pub name: String,

    /// Repository web URL
    pub url: String,

    /// Login of the owning user or organization
    pub owner_login: String,

    /// Primary language, if GitHub detected one
    pub primary_language: Option<String>,

    /// Total stargazers
    pub stargazer_count: u64,

    /// Total forks
    pub fork_count: u64,
}

impl RepositoryRecord {
    /// `owner/name` form, used in log fields
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner_login, self.name)
    }
}
