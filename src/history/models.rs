//! Data models for request history.
//!
//! This module defines the core data structures for storing and managing
//! executed requests and their outcomes.

use crate::models::{HttpMethod, ResponseData, ResponseResult};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A single entry in the request history.
///
/// Combines the method and URL of the request that was sent with the
/// response it produced. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier for this history entry.
    ///
    /// Generated using UUID v4. Documents without ids get fresh ones on load.
    #[serde(default = "new_entry_id")]
    pub id: String,

    /// Method of the originating request.
    pub method: HttpMethod,

    /// URL of the originating request.
    pub url: String,

    /// When the response was recorded, in milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Parsed response body.
    pub data: ResponseData,

    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// HTTP status code.
    pub status: u16,

    /// HTTP reason phrase.
    #[serde(default)]
    pub status_text: String,
}

fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(method: HttpMethod, url: impl Into<String>, result: ResponseResult) -> Self {
        Self::at(method, url, result, Utc::now().timestamp_millis())
    }

    /// Creates an entry with an explicit timestamp.
    pub fn at(
        method: HttpMethod,
        url: impl Into<String>,
        result: ResponseResult,
        timestamp: i64,
    ) -> Self {
        Self {
            id: new_entry_id(),
            method,
            url: url.into(),
            timestamp,
            data: result.data,
            headers: result.headers,
            status: result.status,
            status_text: result.status_text,
        }
    }

    /// The timestamp as a UTC date-time, if it is in range.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// The stored response fields, as shown in the response viewer.
    pub fn to_response(&self) -> ResponseResult {
        ResponseResult {
            data: self.data.clone(),
            headers: self.headers.clone(),
            status: self.status,
            status_text: self.status_text.clone(),
        }
    }
}

/// Errors that can occur during history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Error occurred during storage operations (file I/O).
    #[error("History storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// Error occurred during serialization or deserialization.
    #[error("History serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
