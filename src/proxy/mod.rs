//! API forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! /api/<rest>?<query> (from the router)
//!     → target.rs (origin + remainder → absolute upstream URI, Host value)
//!     → forwarder.rs (fresh connection, stream request body upstream)
//!     → upstream status + headers copied verbatim, body streamed back
//! ```
//!
//! # Trust Boundary
//! The remainder path and every inbound header are passed upstream as-is.
//! This is a local development tool; it is not meant to face untrusted
//! clients, and no validation is layered on top of what the upstream does.
//!
//! # Known Limitation
//! Failures before upstream headers arrive become `500 Proxy Error: ...`.
//! Once headers have been sent to the client, a failure while streaming
//! the body can only be logged; the client sees a truncated response.

pub mod error;
pub mod forwarder;
pub mod target;

pub use error::ProxyError;
pub use forwarder::Forwarder;
pub use target::{UpstreamOrigin, UpstreamTarget};
