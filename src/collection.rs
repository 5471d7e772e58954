//! Portable history documents.
//!
//! A [`Collection`] is the exported form of the whole history:
//!
//! ```json
//! { "history": [ ... ], "timestamp": 1700000000000, "name": "WebPost Collection 2023-11-14 22:13:20" }
//! ```
//!
//! Import accepts any JSON object with a `history` array; other fields are
//! ignored. A [`ShareDocument`] is the same without the name and is what gets
//! copied to the clipboard.

use crate::history::HistoryEntry;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON, or not a JSON object.
    #[error("Invalid collection file: {0}")]
    InvalidDocument(String),

    /// The `history` array holds entries that do not match the entry schema.
    #[error("Invalid history entries: {0}")]
    InvalidHistory(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub history: Vec<HistoryEntry>,
    pub timestamp: i64,
    pub name: String,
}

impl Collection {
    /// Wraps `history` with the current time and a generated name.
    pub fn new(history: Vec<HistoryEntry>) -> Self {
        Self::at(history, Utc::now().timestamp_millis())
    }

    pub fn at(history: Vec<HistoryEntry>, timestamp: i64) -> Self {
        let stamp = Utc
            .timestamp_millis_opt(timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| timestamp.to_string());

        Self {
            history,
            timestamp,
            name: format!("WebPost Collection {}", stamp),
        }
    }

    /// Suggested file name for a download of this collection.
    pub fn file_name(&self) -> String {
        format!("webpost-collection-{}.json", self.timestamp)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareDocument {
    pub history: Vec<HistoryEntry>,
    pub timestamp: i64,
}

impl ShareDocument {
    pub fn new(history: Vec<HistoryEntry>) -> Self {
        Self {
            history,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Extracts the history list from an imported document.
///
/// Returns `Ok(None)` for a JSON object without a `history` array; the
/// caller treats that as nothing to import.
pub fn parse_collection(text: &str) -> Result<Option<Vec<HistoryEntry>>, ImportError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidDocument(e.to_string()))?;

    let object = document.as_object().ok_or_else(|| {
        ImportError::InvalidDocument("expected a JSON object".to_string())
    })?;

    match object.get("history") {
        Some(history @ Value::Array(_)) => serde_json::from_value(history.clone())
            .map(Some)
            .map_err(|e| ImportError::InvalidHistory(e.to_string())),
        _ => Ok(None),
    }
}
