//! Error types for the session pipeline.
//!
//! # Design
//! Every stage fails fast and reports through `SessionError`; nothing is
//! retried here. Transport and codec failures keep the underlying error as
//! their `source` so callers can downcast when they need the detail.
//!
//! Requesting an empty path on a session without a base URL is a defect in
//! the calling code and panics instead of producing a variant here.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `SessionManager` and `Response`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session is missing something the call needs, e.g. an encoder for
    /// a body-bearing request.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// The path could not be parsed or resolved into an absolute URL.
    #[error("invalid path passed: {path}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The method name is not one of the standard HTTP methods.
    #[error("invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid header {name}")]
    InvalidHeader { name: String },

    /// The request body could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationError(#[source] BoxError),

    /// An adapter refused to produce a request; nothing was dispatched.
    #[error("adapter failed: {0}")]
    AdapterError(#[source] BoxError),

    /// The underlying HTTP client failed (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    TransportError(#[source] BoxError),

    /// The response payload could not be decoded into the requested type.
    #[error("deserialization failed: {0}")]
    DeserializationError(#[source] BoxError),
}

impl SessionError {
    pub fn adapter(err: impl Into<BoxError>) -> Self {
        SessionError::AdapterError(err.into())
    }

    pub fn transport(err: impl Into<BoxError>) -> Self {
        SessionError::TransportError(err.into())
    }
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;
