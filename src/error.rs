//! Error types for administrative API calls

use thiserror::Error;

/// Errors surfaced by the administrative client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("unexpected response status: {status} ({body})")]
    UnexpectedStatus { status: u16, body: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// The HTTP status observed on the failed request, if the request
    /// reached the server at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for administrative API calls
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            ClientError::NetworkError {
                message: format!("Connection failed: {}", e),
            }
        } else {
            ClientError::NetworkError {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}
