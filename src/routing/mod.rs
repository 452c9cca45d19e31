//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → router.rs (OPTIONS? API prefix? otherwise static)
//!     → matcher.rs (prefix check and strip)
//!     → Return: Route::Preflight | Route::Api | Route::Static
//! ```
//!
//! # Design Decisions
//! - Routing table is fixed at startup, not runtime-configurable
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Route, Router};
