//! HTTP response data models.
//!
//! This module defines the normalized result of a successful send: the
//! opportunistically parsed body, the response headers, and the status line.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Response body after best-effort parsing.
///
/// Stored as `{"kind": "json" | "text", "value": ...}` so a text body that
/// happens to look like JSON survives a save/load cycle unchanged. Documents
/// holding a bare value are also accepted: a string becomes `Text`, anything
/// else `Json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TaggedData", from = "StoredData")]
pub enum ResponseData {
    /// Body parsed as JSON.
    Json(Value),
    /// Body kept as plain text.
    Text(String),
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Json(_) => None,
            ResponseData::Text(text) => Some(text),
        }
    }

    /// Extracts a human-readable error message from an error response body.
    ///
    /// Objects yield their `message` or `error` field when present, other JSON
    /// is stringified, and text is returned as-is.
    pub fn error_message(&self) -> String {
        match self {
            ResponseData::Json(Value::Object(map)) => ["message", "error"]
                .iter()
                .filter_map(|field| map.get(*field))
                .find(|value| is_truthy(value))
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
            ResponseData::Json(Value::String(s)) => s.clone(),
            ResponseData::Json(other) => other.to_string(),
            ResponseData::Text(text) => text.clone(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
enum TaggedData {
    Json(Value),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredData {
    Tagged(TaggedData),
    Bare(Value),
}

impl From<ResponseData> for TaggedData {
    fn from(data: ResponseData) -> Self {
        match data {
            ResponseData::Json(value) => TaggedData::Json(value),
            ResponseData::Text(text) => TaggedData::Text(text),
        }
    }
}

impl From<StoredData> for ResponseData {
    fn from(stored: StoredData) -> Self {
        match stored {
            StoredData::Tagged(TaggedData::Json(value)) => ResponseData::Json(value),
            StoredData::Tagged(TaggedData::Text(text)) => ResponseData::Text(text),
            StoredData::Bare(Value::String(text)) => ResponseData::Text(text),
            StoredData::Bare(value) => ResponseData::Json(value),
        }
    }
}

/// A successful, normalized response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResult {
    /// Parsed body.
    pub data: ResponseData,

    /// Response headers with lower-case names.
    pub headers: HashMap<String, String>,

    /// HTTP status code.
    pub status: u16,

    /// HTTP reason phrase, e.g. "OK".
    pub status_text: String,
}

impl ResponseResult {
    /// Checks if the status is in the 200-299 range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }
}
