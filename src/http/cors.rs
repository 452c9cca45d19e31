//! Cross-origin header policy.
//!
//! # Responsibilities
//! - Attach the three permissive CORS headers to every response
//! - Answer preflight requests without routing further
//! - Optionally mark every response as non-cacheable
//!
//! # Design Decisions
//! - Applied as response-header layers around the whole router, so
//!   static files, forwarded responses and error bodies all carry them
//! - Set-if-absent: an upstream that sends its own CORS headers keeps them

use axum::body::Body;
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate";

/// Wrap a router with the CORS response headers.
pub fn apply_cors_policy<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}

/// Wrap a router so browsers never cache what it serves.
pub fn apply_no_store<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(NO_STORE),
    ))
}

/// Response to a CORS preflight: 200, empty body. Headers come from the policy layers.
pub fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    response
}
