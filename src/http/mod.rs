//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one task per connection)
//!     → cors.rs (policy headers wrap every response)
//!     → routing (preflight | API | static)
//!     → proxy::Forwarder or static_files::StaticFiles
//!     → Send to client
//! ```

pub mod cors;
pub mod server;

pub use server::{AppState, HttpServer};
