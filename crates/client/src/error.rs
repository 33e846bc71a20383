//! API client errors

use thiserror::Error;

/// Errors from talking to the procurement service
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status
    #[error("Service returned status {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// The request never produced a response (connect, timeout, reset)
    #[error("Connection failed: {source}")]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A 2xx response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

impl ApiError {
    /// Create a transport error from a plain message
    pub fn transport(message: impl Into<String>) -> Self {
        let message: String = message.into();
        ApiError::Transport {
            source: message.into(),
        }
    }

    /// Create a status error
    pub fn status(status: u16, detail: Option<String>) -> Self {
        ApiError::Status { status, detail }
    }

    /// Server-provided `detail`, if the service sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, if the service answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message to show the user: the server detail, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Transport {
                source: Box::new(err),
            }
        }
    }
}
