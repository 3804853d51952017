//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Pure function over the
//! config, reporting every violation rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),
    #[error("upstream.url '{0}' is not a valid http(s) URL")]
    InvalidUpstreamUrl(String),
    #[error("upstream.request_timeout_ms must be > 0")]
    ZeroRequestTimeout,
    #[error("upstream.max_pool_size must be >= 1")]
    ZeroPoolSize,
    #[error("limits.max_body_bytes must be > 0")]
    ZeroMaxBodyBytes,
    #[error("circuit_breaker.failure_threshold must be >= 1")]
    ZeroFailureThreshold,
    #[error("listener.tls.cert_path must not be blank")]
    BlankTlsCertPath,
    #[error("listener.tls.key_path must not be blank")]
    BlankTlsKeyPath,
}

/// Validate a parsed configuration, collecting all violations.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidUpstreamUrl(
            config.upstream.url.clone(),
        )),
    }

    if config.upstream.request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.upstream.max_pool_size == 0 {
        errors.push(ValidationError::ZeroPoolSize);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroMaxBodyBytes);
    }
    if config.circuit_breaker.failure_threshold == 0 {
        errors.push(ValidationError::ZeroFailureThreshold);
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::BlankTlsCertPath);
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::BlankTlsKeyPath);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
