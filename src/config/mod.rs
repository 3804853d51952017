//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! TOML config file
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults, so a missing file or a minimal file works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CircuitBreakerConfig, GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig,
    TlsConfig, UpstreamConfig,
};
