//! JSON-RPC gateway in front of a single fixed upstream endpoint.
//!
//! Terminates client connections, validates JSON-RPC 2.0 envelopes (single
//! or batched), forwards accepted payloads verbatim to the upstream over a
//! pooled HTTP client, and shields the upstream behind a circuit breaker.
//! Per-method call counts are aggregated for observability.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                  GATEWAY                     │
//!  Client ───────▶│  http/server  ─▶  rpc/envelope validator     │
//!                 │       │                  │                   │
//!                 │       │          observability/metrics       │
//!                 │       ▼                                      │
//!                 │  resilience/circuit_breaker                  │
//!                 │       │                                      │
//!                 │       ▼                                      │
//!  Client ◀───────│  upstream/forwarder  ────────────────────────┼──▶ Upstream
//!                 │                                              │
//!                 │  config · net/tls · lifecycle · logging      │
//!                 └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod rpc;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
