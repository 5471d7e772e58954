//! Response viewer rendering.
//!
//! Turns a [`ResponseResult`] into the three panes the viewer shows: the
//! status line, the body (JSON pretty-printed, text verbatim) and the
//! headers as `key: value` lines.

pub mod json;

use crate::models::response::{ResponseData, ResponseResult};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during response formatting.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON formatting error: {0}")]
    JsonError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// Status classification used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// No response yet.
    None,
    /// 2xx
    Success,
    /// 1xx and 3xx
    Redirect,
    /// 4xx and 5xx
    Error,
}

impl StatusClass {
    pub fn of(status: Option<u16>) -> Self {
        match status {
            None | Some(0) => StatusClass::None,
            Some(code) if (200..300).contains(&code) => StatusClass::Success,
            Some(code) if code >= 400 => StatusClass::Error,
            Some(_) => StatusClass::Redirect,
        }
    }
}

/// Formatted HTTP response ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResponse {
    /// e.g. `200 OK`
    pub status_line: String,
    pub status_class: StatusClass,
    /// One `key: value` per line, sorted by header name.
    pub headers_text: String,
    pub formatted_body: String,
}

impl FormattedResponse {
    /// Renders all three sections as one block of text.
    pub fn to_display_string(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Status: {}\n\n", self.status_line));
        output.push_str(&self.formatted_body);
        output.push_str("\n\nHeaders:\n");
        if self.headers_text.is_empty() {
            output.push_str("No headers available\n");
        } else {
            output.push_str(&self.headers_text);
        }
        output
    }
}

impl fmt::Display for FormattedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

/// Formats a response for the viewer.
pub fn format_response(response: &ResponseResult) -> FormattedResponse {
    FormattedResponse {
        status_line: format!("{} {}", response.status, response.status_text)
            .trim_end()
            .to_string(),
        status_class: StatusClass::of(Some(response.status)),
        headers_text: format_headers(response),
        formatted_body: format_body(&response.data),
    }
}

/// Pretty-prints JSON bodies; text bodies are returned unchanged.
pub fn format_body(data: &ResponseData) -> String {
    match data {
        ResponseData::Json(value) => {
            json::format_json_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ResponseData::Text(text) => text.clone(),
    }
}

fn format_headers(response: &ResponseResult) -> String {
    let mut names: Vec<&String> = response.headers.keys().collect();
    names.sort();

    names
        .into_iter()
        .map(|name| format!("{}: {}\n", name, response.headers[name]))
        .collect()
}
