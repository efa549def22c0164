//! Test support utilities for Trellis layout integration tests
//!
//! - TestChild: configurable child with a measurement counter
//! - Assertions: track and rectangle assertions

mod assertions;
mod test_child;

pub use assertions::*;
pub use test_child::{MeasureCount, TestChild};

/// Route engine logs to the test writer. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
