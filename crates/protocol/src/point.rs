//! Measurement points
//!
//! A point is one time-stamped sample: indexed tags plus unindexed fields.
//! Tags are typed as strings so integers and booleans can never end up
//! indexed; a `None` tag is the null representation and is omitted when the
//! point is encoded.

use serde::Serialize;

use crate::record::RepositoryRecord;

/// Tag key for the owner login
pub const TAG_OWNER: &str = "owner";
/// Tag key for the primary language
pub const TAG_LANGUAGE: &str = "language";

/// Field key for the repository name
pub const FIELD_NAME: &str = "name";
/// Field key for the repository URL
pub const FIELD_URL: &str = "url";
/// Field key for the stargazer total
pub const FIELD_STARGAZER_COUNT: &str = "stargazerCount";
/// Field key for the fork total
pub const FIELD_FORK_COUNT: &str = "forkCount";

/// Indexed dimensions of a repository point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointTags {
    pub owner: String,
    pub language: Option<String>,
}

impl PointTags {
    /// Tags as `(key, value)` pairs, skipping null tags
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        std::iter::once((TAG_OWNER, Some(self.owner.as_str())))
            .chain(std::iter::once((TAG_LANGUAGE, self.language.as_deref())))
            .filter_map(|(key, value)| value.map(|v| (key, v)))
    }
}

/// Unindexed values of a repository point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointFields {
    pub name: String,
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
}

/// One repository sample destined for the metrics store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementPoint {
    pub tags: PointTags,
    pub fields: PointFields,
    /// Sample time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

impl MeasurementPoint {
    /// Derive a point from a record, stamped with `timestamp_ms`
    pub fn from_record(record: &RepositoryRecord, timestamp_ms: i64) -> Self {
        Self {
            tags: PointTags {
                owner: record.owner_login.clone(),
                language: record.primary_language.clone(),
            },
            fields: PointFields {
                name: record.name.clone(),
                url: record.url.clone(),
                stargazer_count: record.stargazer_count,
                fork_count: record.fork_count,
            },
            timestamp_ms,
        }
    }

    /// Derive one point per record, all sharing the same timestamp
    pub fn from_records(records: &[RepositoryRecord], timestamp_ms: i64) -> Vec<Self> {
        records
            .iter()
            .map(|r| Self::from_record(r, timestamp_ms))
            .collect()
    }
}
