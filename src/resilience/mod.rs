//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarding attempt:
//!     → circuit_breaker.rs (may the attempt reach the network at all?)
//!     → forwarder enforces the per-request deadline
//!     → outcome fed back into the breaker state machine
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a hard deadline
//! - No retries: a failed forward is terminal for its request
//! - The breaker prevents cascading failure of the single upstream

pub mod circuit_breaker;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
