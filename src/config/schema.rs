//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the development proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API the `/api/` prefix forwards to.
    pub upstream: UpstreamConfig,

    /// Document root served for every non-API path.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host (and optional port) of the remote API, e.g. "http://apis.data.go.kr".
    pub origin: String,

    /// Path prefix that selects forwarding. Requests must start with `<prefix>/`.
    pub api_prefix: String,

    /// Upstream connect timeout in seconds (0 disables the timeout).
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "http://apis.data.go.kr".to_string(),
            api_prefix: "/api".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Web app served for `/` when nothing else is configured.
pub const DEFAULT_DOCUMENT: &str = "병원정보조회_웹앱_로컬용.html";

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root directory.
    pub root: String,

    /// Document served for `/`.
    pub default_document: String,

    /// Attach `Cache-Control: no-store` to every response.
    pub no_store: bool,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            default_document: DEFAULT_DOCUMENT.to_string(),
            no_store: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
