//! Error types for the CRUD API client.
//!
//! # Design
//! Failures fall into three runtime categories: the request never produced a
//! response (`Network`), the response carried a status outside the accepted
//! set (`Status`), or the body could not be decoded (`Decode`). Payloads that
//! fail to serialize surface before any I/O as `Serialization`.
//!
//! `Display` gives a plain descriptive message for every variant, so callers
//! that only care about text can use `ApiError::message`.

use thiserror::Error;

/// Errors returned by `CrudClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed before a complete response was received.
    #[error("{0}")]
    Network(String),

    /// The server answered with a status outside 200, 201 and 403.
    #[error("Incorrect statusCode: {status}")]
    Status { status: u16, body: String },

    /// JSON decoding was requested but the body is not valid JSON.
    #[error("{0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The failure as a plain message string.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the failure came from an unaccepted response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors loading a `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}
