//! Circuit breaker for upstream protection.
//!
//! # States
//! - Closed: normal operation, requests pass through
//! - Open: upstream assumed down, requests fail fast
//! - Half-Open: testing if the upstream recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive failures >= threshold
//! Open → Half-Open: first attempt after the reset timeout
//! Half-Open → Closed: trial request succeeds
//! Half-Open → Open: trial request fails
//! ```
//!
//! One instance guards the single upstream target. All transitions happen
//! under a mutex: concurrent completions cannot double-transition or corrupt
//! the failure counter, and while a half-open trial is in flight every other
//! arrival is refused as if the breaker were still open.
//!
//! Failure here means the attempt produced no upstream response at all
//! (timeout or transport error). Any HTTP-level response counts as success;
//! the breaker never inspects JSON-RPC payload semantics.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug)]
struct BreakerInner {
    state: BreakerState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    reset_timeout: Duration,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            reset_timeout,
            inner: Mutex::new(BreakerInner {
                state: BreakerState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                trial_in_flight: false,
            }),
        }
    }

    /// Whether the next forwarding attempt may reach the network.
    ///
    /// While open, flips to half-open once the reset timeout has elapsed and
    /// admits the caller as the single trial; until that trial completes via
    /// [`record_success`](Self::record_success) or
    /// [`record_failure`](Self::record_failure), everyone else is refused.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => true,
            BreakerState::Open => {
                let elapsed = inner.opened_at.map(|at| at.elapsed()).unwrap_or_default();
                if elapsed < self.reset_timeout {
                    return false;
                }
                inner.state = BreakerState::HalfOpen;
                inner.trial_in_flight = true;
                tracing::info!("circuit breaker half-open, admitting trial request");
                true
            }
            BreakerState::HalfOpen => {
                if inner.trial_in_flight {
                    false
                } else {
                    inner.trial_in_flight = true;
                    true
                }
            }
        }
    }

    /// Record an attempt that completed with an upstream response.
    pub fn record_success(&self) {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => inner.consecutive_failures = 0,
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Closed;
                inner.consecutive_failures = 0;
                inner.opened_at = None;
                inner.trial_in_flight = false;
                tracing::info!("circuit breaker closed after successful trial");
            }
            // A request admitted before the breaker opened may complete
            // afterwards; its outcome no longer matters.
            BreakerState::Open => {}
        }
    }

    /// Record an attempt that produced no upstream response.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.failure_threshold {
                    inner.state = BreakerState::Open;
                    inner.opened_at = Some(Instant::now());
                    inner.consecutive_failures = 0;
                    tracing::warn!(
                        threshold = self.failure_threshold,
                        "circuit breaker opened"
                    );
                }
            }
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Open;
                inner.opened_at = Some(Instant::now());
                inner.trial_in_flight = false;
                tracing::warn!("circuit breaker reopened after failed trial");
            }
            BreakerState::Open => {}
        }
    }

    pub fn state(&self) -> BreakerState {
        self.lock().state
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        // Never held across an await; poisoning would mean a panic inside
        // one of the short critical sections above.
        self.inner.lock().expect("circuit breaker lock poisoned")
    }
}
