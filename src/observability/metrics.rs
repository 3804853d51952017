//! Metrics collection and exposition.
//!
//! Two paths, updated together on every accepted call:
//! - the process-lifetime per-method map rendered by `GET /metrics`
//! - the `jsonrpc_calls_total` Prometheus counter scraped via
//!   `GET /prometheus`
//!
//! Updates are sharded-map entry bumps plus an atomic counter increment, so
//! the hot path never takes a global lock.

use std::collections::BTreeMap;

use dashmap::DashMap;
use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const JSONRPC_CALLS_TOTAL: &str = "jsonrpc_calls_total";
pub const LABEL_METHOD: &str = "method";

/// Per-method counts of accepted JSON-RPC calls.
///
/// Counts accepted calls, not successful ones: a request that validates but
/// fails to forward is still counted. Counts are monotonic and never reset
/// for the life of the process.
#[derive(Debug, Default)]
pub struct MethodCalls {
    counts: DashMap<String, u64>,
}

impl MethodCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call of `method`. Safe under arbitrary concurrent callers.
    pub fn increment(&self, method: &str) {
        *self.counts.entry(method.to_owned()).or_insert(0) += 1;
        counter!(JSONRPC_CALLS_TOTAL, LABEL_METHOD => method.to_owned()).increment(1);
    }

    /// Point-in-time view of every method with at least one recorded call.
    ///
    /// Individual entries are read atomically; methods never observed are
    /// absent rather than zero.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

/// Install the global Prometheus recorder and return its scrape handle.
///
/// May be called at most once per process; the handle renders the text
/// exposition for the scrape endpoint.
pub fn init_prometheus() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
