//! Stargaze - Connectors
//!
//! Pulls repository statistics from the GitHub GraphQL search API and hands
//! them to the sink layer.
//!
//! # Architecture
//!
//! ```text
//! [IntervalScheduler] --tick--> [Collector::fetch_cycle]
//!                                   |
//!                                   +--> query::build --> GraphQlClient::execute --> mapper::map
//!                                   |
//!                                   +--> MeasurementPoint::from_records --> Writer::store
//! ```
//!
//! - `query` builds the search request (pure)
//! - `mapper` turns the response payload into records (pure)
//! - `GraphQlClient` is the transport capability; `GitHub` implements it
//! - `Collector` runs one cycle, or all of them via `run_forever`
//!
//! # Example
//!
//! ```ignore
//! use stargaze_connectors::{Collector, CollectorConfig, GitHub};
//!
//! let client = Arc::new(GitHub::with_token("ghp_xxx")?);
//! let config = CollectorConfig::new("stars:>1000", 10, Duration::from_secs(300))?;
//! let collector = Arc::new(Collector::new(config, client, writer));
//!
//! let report = collector.fetch_cycle(None).await?;
//! println!("{} records, next cursor {:?}", report.records, report.cursor);
//! ```

pub mod config;
mod error;
pub mod mapper;
pub mod query;
pub mod resilience;
mod collector;
mod github;
mod scheduler;
mod traits;

// Re-exports
pub use collector::{Collector, CycleReport};
pub use config::CollectorConfig;
pub use error::ConnectorError;
pub use github::{DEFAULT_API_URL, GitHub, GitHubConfig};
pub use mapper::MappedPage;
pub use query::SearchRequest;
pub use scheduler::IntervalScheduler;
pub use stargaze_config::OverlapPolicy;
pub use traits::GraphQlClient;
