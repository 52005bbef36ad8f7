//! Search result mapping
//!
//! Turns a raw GraphQL `data` payload into `RepositoryRecord`s plus the
//! cursor of the last edge. A node missing any required field fails the
//! whole page; nothing is silently skipped. The only optional value is the
//! primary language.

use serde::Deserialize;
use serde_json::Value;
use stargaze_protocol::{Cursor, RepositoryRecord};

use crate::error::ConnectorError;

/// One mapped result page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedPage {
    /// Records in result order
    pub records: Vec<RepositoryRecord>,
    /// Cursor of the final edge, `None` when the page is empty
    pub last_cursor: Option<Cursor>,
}

impl MappedPage {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Deserialize)]
struct SearchData {
    search: Option<SearchConnection>,
}

#[derive(Deserialize)]
struct SearchConnection {
    edges: Option<Vec<Option<Edge>>>,
    nodes: Option<Vec<Option<Node>>>,
}

#[derive(Deserialize)]
struct Edge {
    cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Node {
    name: Option<String>,
    url: Option<String>,
    stargazers: Option<Total>,
    forks: Option<Total>,
    owner: Option<Owner>,
    primary_language: Option<Language>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Total {
    total_count: Option<u64>,
}

#[derive(Deserialize)]
struct Owner {
    login: Option<String>,
}

#[derive(Deserialize)]
struct Language {
    name: Option<String>,
}

/// Map a `data` payload into records and the last cursor
///
/// # Errors
///
/// Returns `ConnectorError::MalformedResponse` when `search`, `nodes` or
/// `edges` is absent, when any node lacks a required field, or when a value
/// has the wrong type (e.g. a negative count).
pub fn map(data: &Value) -> Result<MappedPage, ConnectorError> {
    let parsed = SearchData::deserialize(data)
        .map_err(|e| ConnectorError::MalformedResponse(format!("search payload: {}", e)))?;

    let search = parsed
        .search
        .ok_or_else(|| malformed("search", None))?;
    let nodes = search.nodes.ok_or_else(|| malformed("search.nodes", None))?;
    let edges = search.edges.ok_or_else(|| malformed("search.edges", None))?;

    let records = nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| map_node(index, node))
        .collect::<Result<Vec<_>, _>>()?;

    let last_cursor = match edges.into_iter().last() {
        None => None,
        Some(edge) => {
            let cursor = edge
                .and_then(|e| e.cursor)
                .ok_or_else(|| malformed("edges[last].cursor", None))?;
            Some(Cursor::new(cursor))
        }
    };

    Ok(MappedPage {
        records,
        last_cursor,
    })
}

fn map_node(index: usize, node: Option<Node>) -> Result<RepositoryRecord, ConnectorError> {
    let node = node.ok_or_else(|| malformed("node", Some(index)))?;

    let name = node.name.ok_or_else(|| malformed("name", Some(index)))?;
    let url = node.url.ok_or_else(|| malformed("url", Some(index)))?;
    let stargazer_count = node
        .stargazers
        .and_then(|t| t.total_count)
        .ok_or_else(|| malformed("stargazers.totalCount", Some(index)))?;
    let fork_count = node
        .forks
        .and_then(|t| t.total_count)
        .ok_or_else(|| malformed("forks.totalCount", Some(index)))?;
    let owner_login = node
        .owner
        .and_then(|o| o.login)
        .ok_or_else(|| malformed("owner.login", Some(index)))?;
    let primary_language = node.primary_language.and_then(|l| l.name);

    Ok(RepositoryRecord {
        name,
        url,
        owner_login,
        primary_language,
        stargazer_count,
        fork_count,
    })
}

fn malformed(field: &str, index: Option<usize>) -> ConnectorError {
    match index {
        Some(i) => ConnectorError::MalformedResponse(format!("nodes[{}] missing {}", i, field)),
        None => ConnectorError::MalformedResponse(format!("missing {}", field)),
    }
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;
