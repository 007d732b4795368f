//! Error types for the Yclients API client.
//!
//! # Design
//! Argument problems (`MissingPartnerToken`, `Validation`) are reported
//! before any request is built, so no I/O happens for a call that would be
//! rejected anyway. Non-2xx responses keep the raw status and body; the API
//! explains its failures in JSON, which `json_body` decodes on demand.

use thiserror::Error;

/// Errors returned by `YclientsClient` and `Yclients`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint needs partner authorization but no partner token is set.
    #[error("partner token is not set")]
    MissingPartnerToken,

    /// A required argument field is missing.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request could not be turned into a valid HTTP message
    /// (for example a token containing a newline).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body could not be deserialized into JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The HTTP round-trip itself failed (DNS, connect, timeout, I/O).
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),
}

impl ApiError {
    /// HTTP status of an `HttpError`, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decode the body of an `HttpError` as JSON.
    ///
    /// Returns `None` for other variants or when the body is not JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::HttpError { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}
