//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listening socket (failure is fatal)
//! - Print the human-readable banner once bound
//!
//! # Design Decisions
//! - Fail fast: a port that cannot be bound aborts startup with a
//!   non-zero exit instead of falling back to another port
//! - Banner goes to stdout, separate from the log stream

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::proxy::ProxyError;

/// Errors that stop the proxy from starting or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid upstream: {0}")]
    Upstream(#[from] ProxyError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the configured listen address.
pub async fn bind(config: &ProxyConfig) -> Result<TcpListener, StartupError> {
    let address = &config.listener.bind_address;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }
    Ok(listener)
}

/// Browser-friendly base URL for a bound address.
pub fn listen_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() || addr.ip().is_loopback() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{addr}")
    }
}

/// Startup banner text.
pub fn banner(addr: SocketAddr, config: &ProxyConfig) -> String {
    let rule = "=".repeat(60);
    let url = listen_url(addr);
    format!(
        "{rule}\n\
         Development proxy\n\
         {rule}\n\
         Listening on: {url}\n\
         \n\
         Open in your browser:\n  {url}/{document}\n\
         \n\
         API: {url}{prefix}/ -> {origin}/\n\
         Static files: {root}\n\
         \n\
         Press Ctrl+C to stop.\n\
         {rule}",
        document = config.static_files.default_document,
        prefix = config.upstream.api_prefix,
        origin = config.upstream.origin.trim_end_matches('/'),
        root = config.static_files.root,
    )
}

/// Print the startup banner to stdout.
pub fn print_banner(addr: SocketAddr, config: &ProxyConfig) {
    println!("{}", banner(addr, config));
}
