//! Error types for the task API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because the view reacts
//! to them differently from plain connectivity problems. Every other failure
//! (connection refused, unexpected status, undecodable body) is a transport
//! failure; `is_transport` groups those.

use thiserror::Error;

/// Errors returned by `TaskClient` parse methods and `TaskApi` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a non-2xx status other than 400, 404 or 422.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A required field is missing or invalid, detected client-side or
    /// reported by the server with 400/422.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server returned 404, or the referenced task does not exist.
    #[error("task not found")]
    NotFound,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// True for network failures and unexpected server responses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Http { .. } | ApiError::Deserialization(_)
        )
    }
}
