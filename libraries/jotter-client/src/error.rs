//! Error types for the Jotter client.

use crate::http::ApiRequest;
use jotter_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the notes API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status}) on {request}: {message}")]
    Status {
        status: u16,
        message: String,
        request: Box<ApiRequest>,
    },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Input rejected locally, nothing was sent
    #[error(transparent)]
    Validation(#[from] CoreError),
}

impl ClientError {
    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for an expired or missing session (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The request that produced this error, when known
    pub fn request(&self) -> Option<&ApiRequest> {
        match self {
            ClientError::Status { request, .. } => Some(&**request),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
