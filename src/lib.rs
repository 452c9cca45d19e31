//! Local development proxy.
//!
//! Serves a static web app and forwards its API calls to a remote host
//! under one local origin, adding permissive CORS headers to everything.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod static_files;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
