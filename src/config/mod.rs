//! Configuration management for WebPost.
//!
//! Configuration is loaded once at startup from a JSON file, merged with
//! defaults, validated, and then read through a process-wide accessor.

pub mod schema;

pub use schema::WebPostConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Global configuration instance.
///
/// This is lazily initialized on first access and replaced by `load_config`.
static CONFIG: Lazy<RwLock<WebPostConfig>> = Lazy::new(|| RwLock::new(WebPostConfig::default()));

/// Default location of the configuration file
/// (`~/.config/webpost/config.json` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("webpost").join("config.json"))
}

/// Loads configuration from a JSON value.
///
/// Unknown keys are ignored. A value that does not match the schema is
/// logged and replaced by defaults. The validated result becomes the global
/// configuration.
///
/// # Example
///
/// ```no_run
/// use webpost::config::load_config;
/// use serde_json::json;
///
/// let config = load_config(Some(json!({ "timeout": 60000 }))).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<WebPostConfig, String> {
    let mut config = WebPostConfig::default();

    if let Some(settings) = settings_json {
        match serde_json::from_value::<WebPostConfig>(settings) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                log::warn!("Failed to parse webpost settings: {}. Using defaults.", e);
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Loads configuration from a file.
///
/// A missing file yields the defaults. An unreadable file or invalid JSON is
/// an error.
pub fn load_config_file(path: &Path) -> Result<WebPostConfig, String> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return load_config(None);
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    load_config(Some(value))
}

/// Gets a copy of the current global configuration.
pub fn get_config() -> WebPostConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| WebPostConfig::default())
}

/// Applies an in-place change to the global configuration.
///
/// Reverts to defaults if the change fails validation.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut WebPostConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = WebPostConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = WebPostConfig::default();
    }
}
