//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted payload
//!     → circuit breaker gate (skipped when disabled)
//!     → pooled POST to the fixed upstream URL under the request deadline
//!     → response body returned verbatim, or a terminal ForwardError
//! ```

pub mod forwarder;

pub use forwarder::{ForwardError, UpstreamForwarder};
