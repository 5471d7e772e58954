//! HTTP request execution configuration.
//!
//! The executor itself enforces no timeout; the configured value is handed to
//! the transport when the HTTP client is built.

use crate::config::get_config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for building the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Transport timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ExecutionConfig {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Creates an ExecutionConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self {
            timeout_ms: get_config().timeout,
        }
    }
}

impl Default for ExecutionConfig {
    /// Reads the timeout from the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}
