//! Error types for the authenticated client.
//!
//! # Design
//! Transport-level failure is deliberately not represented here: the
//! completion continuation receives it as a bare boolean and the fire-and-
//! forget flows treat it as terminal. `ApiError` covers the parse side only:
//! unexpected status codes and codec failures, each keeping enough raw
//! material (status, body, serde message) for debugging.

use std::fmt;

/// Errors returned by request building and response parsing.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered outside the 2xx success range.
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpStatus { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
