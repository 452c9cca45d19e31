//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! router, forwarder, static responder, lifecycle
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer to stderr)
//! tower_http::TraceLayer
//!     → one span per request
//! ```

pub mod logging;

pub use logging::init_logging;
