//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline produces:
//!     → logging.rs (structured log events, access log via the trace layer)
//!     → metrics.rs (per-method call counts + Prometheus counters)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → GET /metrics (JSON snapshot of per-method counts)
//!     → GET /prometheus (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;

pub use metrics::MethodCalls;
