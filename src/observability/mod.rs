//! Logging and diagnostic output.
//!
//! Two channels: structured tracing for the access log and lifecycle
//! events, and the verbose console dumps operators enable with `-v`.

pub mod logging;
pub mod verbose;
