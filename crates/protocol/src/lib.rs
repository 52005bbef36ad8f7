//! Stargaze Protocol - types that flow through the collection pipeline
//!
//! - `RepositoryRecord` - one repository as returned by a search page
//! - `Cursor` - opaque pagination token for the search result window
//! - `MeasurementPoint` - time-series sample derived from a record
//!
//! # Data Flow
//!
//! ```text
//! [GraphQL response] --map--> RepositoryRecord --from_record--> MeasurementPoint --> [store]
//! ```
//!
//! Records are produced fresh per fetch cycle and never persisted as
//! entities; only the points derived from them reach the store.

mod cursor;
mod point;
mod record;

pub use cursor::Cursor;
pub use point::{
    FIELD_FORK_COUNT, FIELD_NAME, FIELD_STARGAZER_COUNT, FIELD_URL, MeasurementPoint,
    PointFields, PointTags, TAG_LANGUAGE, TAG_OWNER,
};
pub use record::RepositoryRecord;
