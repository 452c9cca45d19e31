//! Forwarding errors and their HTTP mapping.

use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while forwarding a request upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Origin + remainder did not form a valid absolute URI.
    #[error("invalid upstream target '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    /// Connection, protocol or request-body failure talking to the upstream.
    #[error("{}", describe(.0))]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Render an error with its source chain, e.g.
/// `client error (Connect): tcp connect error: Connection refused (os error 111)`.
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Proxy Error: {self}"),
        )
            .into_response()
    }
}
