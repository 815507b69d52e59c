//! HTTP dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (axum setup, middleware chain, dispatch handler)
//!     → routing table picks the route
//!     → proxy.rs (forward to upstream) or files.rs (serve from disk)
//!     → response back through the middleware chain
//! ```

pub mod files;
pub mod middleware;
pub mod proxy;
pub mod server;

pub use server::{build_app, run, AppState, ServeError};
