//! Route matching logic.
//!
//! # Responsibilities
//! - Match the API path prefix (case-sensitive)
//! - Strip exactly the prefix, keeping the remainder and query verbatim
//!
//! # Design Decisions
//! - A prefix matches only at a segment boundary: `/api/x` matches,
//!   `/apix` and a bare `/api` do not
//! - No regex; a single `starts_with` on the raw request target

/// Matches the API prefix and yields the remainder to forward.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a matcher for a prefix such as `/api` (no trailing slash).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Remove the prefix from a path-and-query, e.g.
    /// `/api/v1/list?page=2` → `/v1/list?page=2`.
    pub fn strip<'a>(&self, path_and_query: &'a str) -> Option<&'a str> {
        path_and_query
            .strip_prefix(self.prefix.as_str())
            .filter(|rest| rest.starts_with('/'))
    }
}
