//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → tls.rs (optional TLS termination via axum-server)
//!     → hand off to the HTTP layer
//! ```

pub mod tls;
