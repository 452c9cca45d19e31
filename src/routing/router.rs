//! Request dispatch.
//!
//! # Responsibilities
//! - Short-circuit CORS preflight (`OPTIONS`)
//! - Send API-prefixed requests to the forwarder
//! - Send everything else to the static file responder
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Dispatch is a pure function of method and request target
//! - Exactly one terminal route per request

use axum::http::{Method, Uri};

use crate::routing::matcher::PathPrefixMatcher;

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight: 200 with an empty body.
    Preflight,
    /// Forward upstream; `remainder` keeps the leading `/` and the query.
    Api { remainder: String },
    /// Serve from the document root; `path` excludes the query.
    Static { path: String },
}

/// Immutable request router.
#[derive(Debug, Clone)]
pub struct Router {
    api: PathPrefixMatcher,
}

impl Router {
    /// Create a router that forwards requests under `api_prefix`.
    pub fn new(api_prefix: &str) -> Self {
        Self {
            api: PathPrefixMatcher::new(api_prefix),
        }
    }

    /// Decide which terminal path handles a request.
    pub fn route(&self, method: &Method, uri: &Uri) -> Route {
        if *method == Method::OPTIONS {
            return Route::Preflight;
        }

        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());

        match self.api.strip(path_and_query) {
            Some(remainder) => Route::Api {
                remainder: remainder.to_string(),
            },
            None => Route::Static {
                path: uri.path().to_string(),
            },
        }
    }
}
