//! Transport error types.

use thiserror::Error;

/// Errors raised while sending a request or reading its response.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Non-2xx status. `message` is an excerpt of the body.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("JSON error: {0}")]
    JsonError(String),

    /// Outbound HTTP is not available on this target.
    #[error("Outbound HTTP unsupported: {0}")]
    Unsupported(String),
}

impl FetchError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}
