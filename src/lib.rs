//! Hive Gate — a path-prefix hive router, reverse proxy and static file
//! server.
//!
//! A *hive* is one content source reachable under a path prefix: a local
//! directory served from disk, or an upstream origin reached through a
//! streaming reverse proxy. One server definition carries three hive lists
//! (critical, local, remote) that compile into a single prefix route table,
//! wrapped by a fixed middleware chain.
//!
//! # Architecture Overview
//!
//! ```text
//!   go.json ──▶ config (load, validate, select server)
//!                  │
//!                  ▼
//!            routing::compiler ──▶ RouteTable
//!                                      │
//!   request ─▶ middleware chain ─▶ dispatch ─┬─▶ proxy  ─▶ upstream
//!   (case fold, CSP, access log,             ├─▶ files  ─▶ local hive dir
//!    .js MIME correction)                    └─▶ files  ─▶ base dir (catch-all)
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod observability;

pub use config::schema::{Hive, Hives, RuntimeFlags, ServerConfig, Servers};
pub use http::server::{build_app, run};
pub use routing::compiler::compile;
pub use routing::table::RouteTable;
