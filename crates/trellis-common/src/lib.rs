//! # Trellis Common
//!
//! Shared plumbing for the Trellis crates: logging bootstrap and its errors.

pub mod logging;

pub use logging::{init_logging, LogConfig, LoggingError};
