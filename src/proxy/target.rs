//! Upstream URL rewriting.
//!
//! The rewrite is a plain concatenation: `origin + remainder`. The
//! remainder already starts with `/` and carries the query string, so
//! nothing after the API prefix is touched.

use axum::http::header::HeaderValue;
use axum::http::Uri;

use crate::proxy::ProxyError;

/// The configured upstream origin, parsed once at startup.
#[derive(Debug, Clone)]
pub struct UpstreamOrigin {
    /// Origin text without a trailing slash.
    base: String,
    /// Value written into the forwarded `Host` header.
    host: HeaderValue,
}

impl UpstreamOrigin {
    /// Parse an origin such as `http://apis.data.go.kr` or `http://127.0.0.1:9000`.
    pub fn parse(origin: &str) -> Result<Self, ProxyError> {
        let base = origin.trim_end_matches('/').to_string();
        let uri: Uri = base.parse().map_err(|e: axum::http::uri::InvalidUri| {
            ProxyError::InvalidTarget {
                url: origin.to_string(),
                reason: e.to_string(),
            }
        })?;
        let host = uri
            .host()
            .and_then(|h| HeaderValue::from_str(h).ok())
            .ok_or_else(|| ProxyError::InvalidTarget {
                url: origin.to_string(),
                reason: "origin has no host".to_string(),
            })?;

        Ok(Self { base, host })
    }

    /// Host name (without port) sent upstream in place of the client's `Host`.
    pub fn host(&self) -> &HeaderValue {
        &self.host
    }

    /// Build the upstream target for a remainder such as `/B551182/list?page=1`.
    pub fn target_for(&self, remainder: &str) -> Result<UpstreamTarget, ProxyError> {
        let url = format!("{}{}", self.base, remainder);
        let uri = url
            .parse::<Uri>()
            .map_err(|e| ProxyError::InvalidTarget {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        Ok(UpstreamTarget { url, uri })
    }
}

/// A fully resolved upstream URL.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    pub url: String,
    pub uri: Uri,
}
