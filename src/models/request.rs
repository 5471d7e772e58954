//! HTTP request data models.
//!
//! This module defines the request-side data structures: the supported
//! methods, the optional body, and the `RequestSpec` handed to the executor
//! for every send.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// HTTP request method.
///
/// Only the five methods the composer offers are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
}

impl HttpMethod {
    /// All methods in selector order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
    ];

    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
        }
    }

    /// Whether a body is ever sent with this method.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }
}

impl Default for HttpMethod {
    fn default() -> Self {
        HttpMethod::GET
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unsupported HTTP method: {}", s.to_ascii_uppercase()))
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body as supplied by the caller.
///
/// The composer always produces `Raw` text; `Json` lets library callers hand
/// over a structure that is serialized at send time.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Raw text that must parse as JSON before it is sent.
    Raw(String),
    /// A structured value, serialized to a JSON string when sent.
    Json(Value),
}

impl RequestBody {
    /// `true` for an empty raw string, which is treated as "no body".
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Raw(text) if text.is_empty())
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Raw(text.to_string())
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Raw(text)
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// A single request as it will be handed to the executor.
///
/// Built fresh for every send and never persisted on its own; history keeps
/// only the method and URL alongside the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL, validated by the executor before any network I/O.
    pub url: String,

    /// Caller-supplied headers, overlaid on the executor defaults.
    pub headers: HashMap<String, String>,

    /// Optional body; ignored for GET.
    pub body: Option<RequestBody>,
}

impl RequestSpec {
    /// Creates a spec with no headers and no body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header, replacing any previous value under the same key.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Builder form of [`RequestSpec::add_header`].
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The body that will actually be considered for sending.
    ///
    /// `None` for GET requests and for empty raw bodies.
    pub fn effective_body(&self) -> Option<&RequestBody> {
        if !self.method.allows_body() {
            return None;
        }
        self.body.as_ref().filter(|body| !body.is_empty())
    }
}
