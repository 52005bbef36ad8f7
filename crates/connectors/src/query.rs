//! Search query construction
//!
//! Builds the GraphQL request for one page of repository search results.
//! Pure: no I/O, no validation beyond what the types enforce. A page size
//! above the API's maximum is not clamped here; the API reports it.

use serde::Serialize;
use serde_json::{Map, Value};
use stargaze_protocol::Cursor;

/// Selection set requested for every repository node
const SEARCH_SELECTION: &str = r#"
    edges {
      cursor
    }
    nodes {
      ... on Repository {
        name
        url
        stargazers {
          totalCount
        }
        forks {
          totalCount
        }
        owner {
          login
        }
        primaryLanguage {
          name
        }
      }
    }"#;

/// A GraphQL request ready for execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Query document
    pub query: String,
    /// Variables referenced by the document
    pub variables: Map<String, Value>,
}

impl SearchRequest {
    /// Filter variable
    pub fn filter(&self) -> Option<&str> {
        self.variables.get("filter").and_then(Value::as_str)
    }

    /// Page size variable
    pub fn page_size(&self) -> Option<u64> {
        self.variables.get("first").and_then(Value::as_u64)
    }

    /// Cursor variable, present only for follow-up pages
    pub fn after(&self) -> Option<&str> {
        self.variables.get("after").and_then(Value::as_str)
    }
}

/// Build a repository search request
///
/// `filter` is passed through verbatim as the search expression (e.g.
/// `stars:>1000 language:rust`). Without `after` the request starts at the
/// first page and carries no pagination clause; with it, the search resumes
/// strictly after that cursor.
pub fn build(filter: &str, page_size: u32, after: Option<&Cursor>) -> SearchRequest {
    let mut variables = Map::new();
    variables.insert("filter".into(), Value::from(filter));
    variables.insert("first".into(), Value::from(page_size));

    let (declarations, arguments) = match after {
        Some(cursor) => {
            variables.insert("after".into(), Value::from(cursor.as_str()));
            (
                "$filter: String!, $first: Int!, $after: String!",
                "query: $filter, type: REPOSITORY, first: $first, after: $after",
            )
        }
        None => (
            "$filter: String!, $first: Int!",
            "query: $filter, type: REPOSITORY, first: $first",
        ),
    };

    let query = format!(
        "query SearchRepositories({}) {{\n  search({}) {{{}\n  }}\n}}\n",
        declarations, arguments, SEARCH_SELECTION
    );

    SearchRequest { query, variables }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;
