//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! go.json (JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Servers (validated, immutable)
//!     → one ServerConfig selected at startup
//!     → shared by the dispatch engine for the process lifetime
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no live reconfiguration
//! - Validation separates syntactic (serde) from semantic checks
//! - Runtime flags come from the CLI only, never from the config file

pub mod loader;
pub mod paths;
pub mod schema;
pub mod validation;

pub use schema::{Hive, Hives, RuntimeFlags, ServerConfig, Servers};
