//! Hive route compilation and matching.
//!
//! # Data Flow
//! ```text
//! ServerConfig (selected at startup)
//!     → compiler.rs (critical, local, remote, catch-all → routes)
//!     → table.rs (immutable prefix table, longest-prefix matching)
//!     → dispatch handler picks Proxy / Local / Fallback per request
//! ```
//!
//! # Design Decisions
//! - Table is immutable after compilation (thread-safe without locks)
//! - O(n) prefix scan (route counts are small, no trie needed)
//! - Each route owns its Hive by value; nothing is shared between routes

pub mod compiler;
pub mod rewrite;
pub mod table;

pub use table::{Route, RouteKind, RouteTable};
