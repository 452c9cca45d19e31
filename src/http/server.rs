//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single dispatching handler
//! - Wire up middleware (tracing, CORS policy, optional no-store)
//! - Bind server to listener
//! - Dispatch requests to preflight, forwarder or static responder
//! - Stop accepting on shutdown signal

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::cors;
use crate::lifecycle::ShutdownSignal;
use crate::proxy::{Forwarder, ProxyError};
use crate::routing::{Route, Router as ProxyRouter};
use crate::static_files::StaticFiles;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Forwarder,
    pub static_files: Arc<StaticFiles>,
}

/// HTTP server for the development proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let state = AppState {
            router: Arc::new(ProxyRouter::new(&config.upstream.api_prefix)),
            forwarder: Forwarder::new(&config.upstream)?,
            static_files: Arc::new(StaticFiles::new(&config.static_files)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = cors::apply_cors_policy(Router::new().fallback(dispatch).with_state(state));
        if config.static_files.no_store {
            router = cors::apply_no_store(router);
        }
        router.layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.origin,
            root = %self.config.static_files.root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Main request handler.
/// Classifies the request and hands it to exactly one terminal path.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    match state.router.route(request.method(), request.uri()) {
        Route::Preflight => cors::preflight_response(),
        Route::Api { remainder } => {
            let (parts, body) = request.into_parts();
            state
                .forwarder
                .forward(parts.method, &remainder, parts.headers, body)
                .await
                .into_response()
        }
        Route::Static { path } => state.static_files.serve(&path).await.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    fn server(root: &std::path::Path) -> HttpServer {
        let mut config = ProxyConfig::default();
        config.static_files.root = root.display().to_string();
        HttpServer::new(config).unwrap()
    }

    #[tokio::test]
    async fn preflight_is_answered_without_a_socket() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/anything")
            .body(Body::empty())
            .unwrap();

        let response = server(dir.path()).into_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn static_request_goes_to_document_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::schema::DEFAULT_DOCUMENT),
            "<p>hi</p>",
        )
        .unwrap();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = server(dir.path()).into_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    }

    #[tokio::test]
    async fn missing_file_maps_to_404() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder().uri("/gone.css").body(Body::empty()).unwrap();

        let response = server(dir.path()).into_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }
}
