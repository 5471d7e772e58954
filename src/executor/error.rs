//! HTTP request execution error types.
//!
//! This module defines the classified failures an execution can end in, and
//! the shaping step that turns a failure into user-facing guidance text.

use thiserror::Error;

/// Guidance shown when the server could not be reached at all.
pub const UNREACHABLE_GUIDANCE: &str = "Server is unreachable. This might be due to:\n\
1. No internet connection\n\
2. The server is down\n\
3. CORS is not enabled on the server\n\
Try checking your connection or using a different API endpoint.";

/// Guidance shown for generic connectivity failures.
pub const NETWORK_GUIDANCE: &str =
    "Network error. Please check your internet connection and try again.";

/// Guidance shown when a cross-origin policy blocked the request.
pub const CORS_GUIDANCE: &str = "CORS error: The API doesn't allow requests from this application.\n\
Possible solutions:\n\
1. Use a CORS proxy\n\
2. Enable CORS on the server\n\
3. Try a different API endpoint";

/// Errors that can occur during HTTP request execution.
///
/// Each variant's `Display` text is the low-level message; use
/// [`ExecutorError::user_message`] for the text shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// Client-side validation failure. No network call was made.
    #[error("{0}")]
    InvalidInput(String),

    /// The request was blocked by a cross-origin policy.
    ///
    /// Carries the underlying transport message for diagnostics.
    #[error("CORS error: The server doesn't allow requests from this origin. Try using a CORS proxy or enable CORS on the server.")]
    Cors(String),

    /// The request could not be completed at the transport level.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a status outside 200-299.
    #[error("Request failed with status {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The HTTP client could not be constructed.
    #[error("Request build error: {0}")]
    Build(String),
}

impl ExecutorError {
    /// `true` when the failure happened before any network I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ExecutorError::InvalidInput(_))
    }

    /// The message to surface to the user.
    pub fn user_message(&self) -> String {
        shape_error_message(&self.to_string())
    }
}

/// Rewrites a low-level failure message into multi-line guidance.
///
/// Messages that match none of the known patterns pass through unchanged.
pub fn shape_error_message(message: &str) -> String {
    if message.contains("Failed to fetch") {
        UNREACHABLE_GUIDANCE.to_string()
    } else if message.contains("NetworkError") {
        NETWORK_GUIDANCE.to_string()
    } else if message.contains("CORS") {
        CORS_GUIDANCE.to_string()
    } else {
        message.to_string()
    }
}
