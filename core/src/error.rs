//! Error types for the Argus client.
//!
//! # Design
//! Three failure modes come back from the remote side and each has its own
//! variant: the exchange never completed (`Connectivity`), the bearer token is
//! no longer accepted (`TokenExpired`), or the server answered with any other
//! non-success status (`Rejected`). A 404 is a `Rejected` like any other
//! status; use [`ApiError::is_not_found`] to test for it.

use thiserror::Error;

/// Errors returned by resource operations and their build/parse halves.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not complete the exchange.
    #[error("connectivity failure: {0}")]
    Connectivity(String),

    /// The server returned 401 for the request's credential.
    #[error("token expired for {url}: {message}")]
    TokenExpired { url: String, message: String },

    /// The server returned a non-2xx status other than 401.
    #[error("request to {url} rejected with HTTP {status}: {message}")]
    Rejected {
        status: u16,
        url: String,
        message: String,
    },

    /// The request entity could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A successful response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }

    pub fn is_token_expired(&self) -> bool {
        matches!(self, ApiError::TokenExpired { .. })
    }

    /// HTTP status carried by a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::TokenExpired { .. } => Some(401),
            _ => None,
        }
    }
}
