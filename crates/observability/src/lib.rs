//! Tracing setup shared by the shell and by tests.

/// Subscriber installation (format, filtering).
pub mod tracing;

pub use crate::tracing::{ENV_LOG_FORMAT, LogFormat, LogSettings, init, init_for_tests, init_with};
