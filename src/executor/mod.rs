//! HTTP request executor.
//!
//! [`Executor::execute`] turns a [`RequestSpec`] into a [`ResponseResult`]:
//!
//! 1. Validate the URL and, for non-GET requests, the JSON body. Nothing is
//!    sent when validation fails.
//! 2. Merge caller headers over the JSON defaults.
//! 3. Send through the [`HttpTransport`]. A transport failure is retried once
//!    with credentials explicitly omitted; a second failure is classified as
//!    [`ExecutorError::Cors`] or [`ExecutorError::Network`].
//! 4. Parse the body: a declared JSON content type must parse, anything else
//!    is tried as JSON first and kept as text otherwise.
//! 5. Reject statuses outside 200-299 with [`ExecutorError::Http`].
//!
//! The executor never touches history; the coordinator records results.

pub mod config;
pub mod error;
pub mod transport;

pub use config::ExecutionConfig;
pub use error::{shape_error_message, ExecutorError};
pub use transport::{
    FetchPolicy, HttpTransport, OutboundRequest, RawResponse, ReqwestTransport, TransportError,
};

use crate::models::request::{RequestBody, RequestSpec};
use crate::models::response::{ResponseData, ResponseResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Headers every request starts from. Caller headers win on collision.
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
];

/// Executes validated, classified HTTP calls over a transport.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Creates an executor using the native reqwest transport.
    pub fn with_reqwest(config: &ExecutionConfig) -> Result<Self, ExecutorError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Executes a request and returns the normalized response.
    ///
    /// # Errors
    ///
    /// - [`ExecutorError::InvalidInput`] if the URL or body fails validation
    /// - [`ExecutorError::Cors`] / [`ExecutorError::Network`] if both attempts fail
    /// - [`ExecutorError::Parse`] if a declared JSON body does not parse
    /// - [`ExecutorError::Http`] if the status is outside 200-299
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use webpost::executor::{ExecutionConfig, Executor};
    /// use webpost::models::{HttpMethod, RequestSpec};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let executor = Executor::with_reqwest(&ExecutionConfig::new(30_000))?;
    /// let spec = RequestSpec::new(HttpMethod::GET, "https://httpbin.org/get");
    /// let result = executor.execute(&spec).await?;
    /// println!("Status: {}", result.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseResult, ExecutorError> {
        validate_spec(spec)?;

        let request = OutboundRequest {
            method: spec.method,
            url: spec.url.trim().to_string(),
            headers: merge_headers(&spec.headers),
            body: serialize_body(spec)?,
            policy: FetchPolicy::default(),
        };

        let raw = self.send_with_fallback(request).await?;
        let data = parse_body(&raw)?;

        if !(200..300).contains(&raw.status) {
            return Err(ExecutorError::Http {
                status: raw.status,
                message: data.error_message(),
            });
        }

        Ok(ResponseResult {
            data,
            headers: raw.headers,
            status: raw.status,
            status_text: raw.status_text,
        })
    }

    async fn send_with_fallback(
        &self,
        mut request: OutboundRequest,
    ) -> Result<RawResponse, ExecutorError> {
        match self.transport.fetch(&request).await {
            Ok(raw) => Ok(raw),
            Err(initial) => {
                log::warn!(
                    "Initial request failed, retrying without credentials: {}",
                    initial
                );
                request.policy.omit_credentials = true;
                self.transport.fetch(&request).await.map_err(|err| {
                    log::error!("Network error details: {}", err);
                    classify_transport_failure(&err)
                })
            }
        }
    }
}

/// Checks a spec without touching the network.
pub fn validate_spec(spec: &RequestSpec) -> Result<(), ExecutorError> {
    if spec.url.trim().is_empty() {
        return Err(ExecutorError::InvalidInput("URL is required".to_string()));
    }

    validate_url(spec.url.trim())?;

    if let Some(RequestBody::Raw(text)) = spec.effective_body() {
        serde_json::from_str::<Value>(text).map_err(|_| {
            ExecutorError::InvalidInput("Invalid JSON in request body".to_string())
        })?;
    }

    Ok(())
}

/// Validates that the URL is absolute, well-formed and HTTP(S).
fn validate_url(url: &str) -> Result<(), ExecutorError> {
    let invalid = || ExecutorError::InvalidInput("Invalid URL format".to_string());

    let parsed = url::Url::parse(url).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid()),
    }
}

/// Overlays caller headers on [`DEFAULT_HEADERS`].
///
/// A caller header replaces a default whose name matches case-insensitively.
pub fn merge_headers(custom: &HashMap<String, String>) -> HashMap<String, String> {
    let mut merged: HashMap<String, String> = DEFAULT_HEADERS
        .iter()
        .filter(|(name, _)| !custom.keys().any(|k| k.eq_ignore_ascii_case(name)))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    merged.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

fn serialize_body(spec: &RequestSpec) -> Result<Option<String>, ExecutorError> {
    match spec.effective_body() {
        None => Ok(None),
        Some(RequestBody::Raw(text)) => Ok(Some(text.clone())),
        Some(RequestBody::Json(value)) => serde_json::to_string(value)
            .map(Some)
            .map_err(|_| ExecutorError::InvalidInput("Invalid JSON in request body".to_string())),
    }
}

/// Interprets a response body.
///
/// A declared JSON content type must parse, otherwise the result is
/// [`ExecutorError::Parse`]. Without that declaration the body is tried as
/// JSON and falls back to text.
pub fn parse_body(raw: &RawResponse) -> Result<ResponseData, ExecutorError> {
    let declares_json = raw
        .content_type()
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if declares_json {
        return serde_json::from_slice::<Value>(&raw.body)
            .map(ResponseData::Json)
            .map_err(|e| {
                log::error!("Response parsing error: {}", e);
                ExecutorError::Parse(e.to_string())
            });
    }

    match serde_json::from_slice::<Value>(&raw.body) {
        Ok(value) => Ok(ResponseData::Json(value)),
        Err(_) => Ok(ResponseData::Text(
            String::from_utf8_lossy(&raw.body).into_owned(),
        )),
    }
}

fn classify_transport_failure(err: &TransportError) -> ExecutorError {
    if err.message.contains("CORS") || err.message.contains("cross-origin") {
        ExecutorError::Cors(err.message.clone())
    } else if err.message.is_empty() {
        ExecutorError::Network("Failed to connect to server".to_string())
    } else {
        ExecutorError::Network(err.message.clone())
    }
}
