//! Error types for the novel API client.
//!
//! # Design
//! The API is read-only, so failures fall into two buckets: the server
//! answered with a non-2xx status (`HttpError`), or the exchange itself broke
//! down (`TransportError` for the network, `DeserializationError` for a body
//! that is not the JSON we expected). An empty result is never an error.

use thiserror::Error;

/// Errors returned by the client, the transport, and the domain queries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP error! status: {status}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Status code of an `HttpError`, `None` for transport and parse failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
