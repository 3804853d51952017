//! Forwarding to the fixed upstream endpoint.
//!
//! One POST per accepted request, payload forwarded verbatim, hard deadline
//! over the whole trip (connect + send + receive). Any HTTP-level response
//! from the upstream is a success for both the client and the breaker; only
//! timeouts and transport errors are failures. No retries — a failed
//! forward is terminal for its request.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use thiserror::Error;
use url::Url;

use crate::config::{CircuitBreakerConfig, UpstreamConfig};
use crate::resilience::CircuitBreaker;

/// Why a forwarding attempt produced no upstream response.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("circuit breaker open")]
    BreakerOpen,
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Failure to construct the forwarder at startup.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct UpstreamForwarder {
    client: reqwest::Client,
    url: Url,
    request_timeout: Duration,
    breaker: Option<CircuitBreaker>,
}

impl UpstreamForwarder {
    pub fn new(
        upstream: &UpstreamConfig,
        breaker: &CircuitBreakerConfig,
    ) -> Result<Self, BuildError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(upstream.max_pool_size)
            .build()?;
        let url = Url::parse(&upstream.url)?;
        let breaker = breaker
            .enabled
            .then(|| CircuitBreaker::new(breaker.failure_threshold, breaker.reset_timeout()));

        Ok(Self {
            client,
            url,
            request_timeout: upstream.request_timeout(),
            breaker,
        })
    }

    /// Forward the raw payload, gated by the breaker when one is configured.
    pub async fn forward(&self, payload: Bytes) -> Result<Bytes, ForwardError> {
        let result = match &self.breaker {
            None => self.send(payload).await,
            Some(breaker) => {
                if !breaker.try_acquire() {
                    return Err(ForwardError::BreakerOpen);
                }
                let result = self.send(payload).await;
                match &result {
                    Ok(_) => breaker.record_success(),
                    Err(_) => breaker.record_failure(),
                }
                result
            }
        };

        if let Err(err) = &result {
            tracing::warn!(error = %err, "upstream call failed");
        }
        result
    }

    async fn send(&self, payload: Bytes) -> Result<Bytes, ForwardError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(self.request_timeout)
            .body(payload)
            .send()
            .await
            .map_err(classify)?;

        // The upstream status code is deliberately not inspected: any
        // HTTP-level response is a successful forward.
        response.bytes().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> ForwardError {
    if err.is_timeout() {
        ForwardError::Timeout
    } else {
        ForwardError::Transport(err)
    }
}
