//! Error types for the Signicat API client.
//!
//! # Design
//! Every failure is scoped to the call that produced it and is returned to
//! the caller unchanged. Non-2xx responses carry only the numeric status; the
//! response body is not parsed into a structured API error.

use thiserror::Error;

use crate::http::TransportError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `SignicatClient` and the endpoint groups.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot have relative paths resolved against it.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A URL (base or relative) could not be parsed.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The outgoing request is missing data the API requires.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status outside 200..=299.
    #[error("received response with http code: {status}")]
    HttpStatus { status: u16 },

    /// The response body is not valid JSON for the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Writing the response body to the caller's sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The HTTP status code, if this error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
