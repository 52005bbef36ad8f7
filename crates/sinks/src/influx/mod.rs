//! InfluxDB store
//!
//! Talks to the InfluxDB 1.x HTTP API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list databases | `GET /query?q=SHOW DATABASES` |
//! | create database | `POST /query` with `q=CREATE DATABASE "<name>"` |
//! | write batch | `POST /write?db=<name>&precision=ms`, line-protocol body |

mod config;
pub mod line_protocol;
mod store;

pub use config::{DEFAULT_TIMEOUT, InfluxConfig};
pub use store::InfluxStore;


#[cfg(test)]
#[path = "line_protocol_test.rs"]
mod line_protocol_test;
