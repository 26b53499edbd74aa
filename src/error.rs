use std::time::Duration;

use serde::Deserialize;

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Error body returned by the backend (`{"detail": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl AppError {
    /// Builds a remote error from a non-success status and its response body.
    ///
    /// Prefers the backend's `detail` message and falls back to the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| body.trim().to_string());

        if status >= 500 {
            AppError::Server { status, message }
        } else {
            AppError::Client { status, message }
        }
    }

    /// Classifies a transport-level reqwest failure.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            AppError::Timeout(timeout)
        } else if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }

    /// HTTP status carried by a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Client { status, .. } | AppError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never produced a response
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }

    /// True when the backend rejected an add because the title is already in the list.
    ///
    /// The backend answers duplicates with 400; 409 is accepted as well.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::Client { status: 400 | 409, .. })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
