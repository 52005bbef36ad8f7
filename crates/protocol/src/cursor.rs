//! Pagination cursor
//!
//! `Cursor` identifies the last record of a search page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque pagination token marking a position in a search result set
///
/// A cursor is only ever produced by the remote API and handed back to it;
/// its content is never interpreted locally. The absence of a cursor means
/// "start of the result set".
///
/// # Example
///
/// ```
/// use stargaze_protocol::Cursor;
///
/// let cursor = Cursor::new("Y3Vyc29yOjI=");
/// assert_eq!(cursor.as_str(), "Y3Vyc29yOjI=");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from a raw token
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the cursor and return the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Cursor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
