//! Streaming request forwarder.
//!
//! # Responsibilities
//! - Rewrite `/api/<rest>` into an absolute upstream URI
//! - Copy inbound method and headers, replacing `Host`
//! - Open a fresh upstream connection per request
//! - Stream bodies in both directions without buffering
//!
//! # Design Decisions
//! - Idle pooling is disabled so no connection outlives its request
//! - Upstream status and headers are passed through untouched
//! - The response body is wrapped so late failures are logged

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request};
use axum::response::Response;
use http_body_util::BodyExt;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::UpstreamConfig;
use crate::proxy::error::describe;
use crate::proxy::{ProxyError, UpstreamOrigin, UpstreamTarget};

/// Forwards API requests to the configured upstream origin.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    origin: UpstreamOrigin,
}

impl Forwarder {
    /// Create a forwarder for the configured upstream.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let origin = UpstreamOrigin::parse(&config.origin)?;

        let mut connector = HttpConnector::new();
        if config.connect_timeout_secs > 0 {
            connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        }

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(connector);

        Ok(Self { client, origin })
    }

    /// Resolve the upstream URL for a path remainder (leading `/`, query included).
    pub fn target(&self, remainder: &str) -> Result<UpstreamTarget, ProxyError> {
        self.origin.target_for(remainder)
    }

    /// Forward one request and return the upstream response with a streaming body.
    ///
    /// Errors returned here happen before any response byte reaches the
    /// client and are turned into `500 Proxy Error: ...` by the caller.
    pub async fn forward(
        &self,
        method: Method,
        remainder: &str,
        headers: HeaderMap,
        body: Body,
    ) -> Result<Response, ProxyError> {
        let target = self.target(remainder)?;

        tracing::info!(
            method = %method,
            upstream = %target.url,
            "Proxying request"
        );

        let mut request = Request::new(body);
        *request.method_mut() = method;
        *request.uri_mut() = target.uri;
        *request.headers_mut() = headers;
        request
            .headers_mut()
            .insert(header::HOST, self.origin.host().clone());

        let response = self.client.request(request).await.map_err(|e| {
            let err = ProxyError::from(e);
            tracing::error!(target_url = %target.url, error = %err, "Upstream request failed");
            err
        })?;

        let (parts, incoming) = response.into_parts();
        tracing::debug!(
            target_url = %target.url,
            status = %parts.status,
            "Upstream responded"
        );

        // Headers are committed to the client from here on.
        let url = target.url;
        let body = incoming.map_err(move |e| {
            tracing::error!(
                target_url = %url,
                error = %describe(&e),
                "Upstream body failed after headers were sent"
            );
            e
        });

        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
