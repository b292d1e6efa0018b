//! Error taxonomy for backend calls and client-side validation.
//!
//! # Design
//! - Every failure the UI can hit is one `ApiError` variant.
//! - Views never inspect variants for display; they call [`ApiError::user_message`].

use squidpanel_api_models::ErrorBody;
use thiserror::Error;

/// Literal shown when a failure carries no usable message.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Failure surfaced by the HTTP binding or by local validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, refused).
    #[error("{0}")]
    Transport(String),
    /// The request exceeded the configured timeout and was aborted.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// Timeout that elapsed, in seconds.
        seconds: u32,
    },
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Decoded error document, when the body was JSON.
        body: Option<ErrorBody>,
    },
    /// The backend answered 2xx but reported the operation as failed.
    #[error("{0}")]
    Rejected(String),
    /// Input was refused before any request was made.
    #[error("{0}")]
    Validation(String),
    /// A response body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Anything without further information.
    #[error("")]
    Unknown,
}

impl ApiError {
    /// Build a status error from the raw response text.
    #[must_use]
    pub fn from_status(status: u16, body_text: &str) -> Self {
        Self::Status {
            status,
            body: serde_json::from_str::<ErrorBody>(body_text).ok(),
        }
    }

    /// Message suitable for a toast or inline error.
    ///
    /// Priority: the server-supplied message, then the error's own message,
    /// then [`UNKNOWN_ERROR`].
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Status {
            body: Some(body), ..
        } = self
            && let Some(summary) = body.summary()
        {
            return summary;
        }
        let own = self.to_string();
        let own = own.trim();
        if own.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            own.to_string()
        }
    }

    /// Whether the failure happened before the backend saw the request.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
