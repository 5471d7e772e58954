//! Configuration schema for WebPost.
//!
//! Defines the user-configurable settings and their validation. Settings are
//! read from a JSON object with camelCase keys; missing keys take defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPostConfig {
    /// Transport timeout in milliseconds.
    ///
    /// Applied by the HTTP client, not by the executor. Defaults to 30000ms.
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Directory holding the persisted history.
    ///
    /// Defaults to the platform data directory (`~/.local/share/webpost` on
    /// Linux) when unset.
    #[serde(default)]
    pub history_dir: Option<PathBuf>,

    /// How long a notification stays visible, in milliseconds.
    ///
    /// Defaults to 5000ms. Must be greater than 0.
    #[serde(default = "default_toast_timeout")]
    pub toast_timeout: u64,
}

impl Default for WebPostConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            history_dir: None,
            toast_timeout: default_toast_timeout(),
        }
    }
}

impl WebPostConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.toast_timeout == 0 {
            return Err("toastTimeout must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Returns the transport timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Returns the notification lifetime as a `Duration`.
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_timeout)
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_toast_timeout() -> u64 {
    5000
}
