//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup: load config → validate → init subsystems → bind listener
//! Signals: SIGINT/SIGTERM → trigger shutdown broadcast
//! Shutdown: stop accepting → drain in-flight requests → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
