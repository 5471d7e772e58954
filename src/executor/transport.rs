//! Outbound HTTP transport.
//!
//! [`HttpTransport`] is the single seam between the executor and the network.
//! [`ReqwestTransport`] is the native implementation; tests substitute their
//! own recording transports.

use crate::executor::config::ExecutionConfig;
use crate::executor::error::ExecutorError;
use crate::models::request::HttpMethod;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Message prefix for failures where the server could not be reached.
pub const FETCH_FAILED: &str = "Failed to fetch";

/// Browser-fetch style flags attached to every outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Cross-origin requests are allowed.
    pub cors: bool,
    /// Cookies and other ambient credentials are never attached.
    pub omit_credentials: bool,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            cors: true,
            omit_credentials: true,
        }
    }
}

/// A fully prepared request, ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub policy: FetchPolicy,
}

/// What came back from the server, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// Header names are lower-case.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }
}

/// A failure below HTTP: no response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Performs a single outbound HTTP call.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn fetch(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError>;
}

/// Native transport backed by reqwest.
///
/// The client has no cookie store, so ambient credentials are never sent
/// regardless of the request's [`FetchPolicy`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ExecutionConfig) -> Result<Self, ExecutorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(concat!("webpost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExecutorError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
        };

        let mut req_builder = self.client.request(method, &request.url);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await.map_err(describe_reqwest_error)?;

        let status = response.status();
        let status_code = status.as_u16();
        // reqwest does not expose the server's reason phrase; unregistered
        // codes get an empty status text.
        let status_text = status.canonical_reason().unwrap_or("").to_string();

        let headers = collect_headers(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(describe_reqwest_error)?
            .to_vec();

        Ok(RawResponse {
            status: status_code,
            status_text,
            headers,
            body,
        })
    }
}

/// Flattens response headers into lower-case names.
///
/// Repeated headers are joined with `", "` in arrival order. Values that are
/// not visible ASCII are skipped.
fn collect_headers(map: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();
    for (name, value) in map {
        let Ok(value) = value.to_str() else {
            continue;
        };
        headers
            .entry(name.as_str().to_ascii_lowercase())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    headers
}

fn describe_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_connect() {
        TransportError::new(format!("{}: {}", FETCH_FAILED, err))
    } else if err.is_timeout() {
        TransportError::new(format!("Request timed out: {}", err))
    } else {
        TransportError::new(err.to_string())
    }
}
