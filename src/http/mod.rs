//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (axum setup, middleware, routes)
//!     → request.rs (x-request-id generation and propagation)
//!     → POST /rpc pipeline: validate → count → forward → respond
//!     → GET /health, /metrics, /prometheus
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, GatewayServer};
