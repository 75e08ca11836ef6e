//! Error types for the Ambient client
//!
//! Failures fall into two families. Transport failures (network errors,
//! cancellation, timeouts) are surfaced verbatim as [`Error::Transport`] so
//! callers can test for cancellation directly. Everything the service said
//! back that we could not accept becomes an [`ApiError`], which records the
//! request that caused it with its credentials stripped.

use crate::query::Query;
use ambidata_transport::TransportError;
use http::{Method, StatusCode};
use std::fmt;
use thiserror::Error;

/// Result type alias for operations that can fail with an Ambient client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Ambient client.
#[derive(Debug, Error)]
pub enum Error {
    /// The service rejected the request or returned something unusable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network, cancellation or timeout failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request body could not be encoded; nothing was sent.
    #[error("ambidata: encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// An argument was rejected before any request was made.
    #[error("ambidata: invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Whether the call ended because its cancellation token fired.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_canceled())
    }

    /// Whether the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }

    /// The HTTP status code, if the service answered with a non-200 status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the service silently rejected an oversized write.
    pub fn is_request_entity_too_large(&self) -> bool {
        matches!(self, Error::Api(e) if matches!(e.kind, ApiErrorKind::RequestEntityTooLarge))
    }
}

/// A failed call to the service.
///
/// The query never contains `userKey`, `readKey` or `writeKey`.
#[derive(Debug)]
pub struct ApiError {
    method: Method,
    path: String,
    query: Query,
    kind: ApiErrorKind,
}

impl ApiError {
    /// Record a failure. Credential keys are removed from `query` here.
    pub(crate) fn new(
        method: Method,
        path: impl Into<String>,
        query: &Query,
        kind: ApiErrorKind,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            query: query.sanitized(),
            kind,
        }
    }

    /// Request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request query without credentials
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// What went wrong
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// The status code, for [`ApiErrorKind::Status`].
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ApiErrorKind::Status(s) => Some(s.code()),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ambidata: {} {}", self.method, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query.encode())?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ApiErrorKind::Status(e) => Some(e),
            ApiErrorKind::RequestEntityTooLarge => None,
            ApiErrorKind::Decode(e) => Some(e),
            ApiErrorKind::Read(e) => Some(e),
        }
    }
}

/// Cause of an [`ApiError`].
#[derive(Debug, Error)]
pub enum ApiErrorKind {
    /// Response status was not 200.
    #[error(transparent)]
    Status(StatusCodeError),

    /// The service answered 200 with the entity-too-large marker.
    #[error("request entity too large")]
    RequestEntityTooLarge,

    /// The response body was not the expected JSON.
    #[error(transparent)]
    Decode(serde_json::Error),

    /// Reading the response body failed.
    #[error(transparent)]
    Read(TransportError),
}

/// A non-200 HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCodeError {
    code: u16,
}

impl StatusCodeError {
    /// Wrap a status code.
    pub fn new(code: u16) -> Self {
        Self { code }
    }

    /// The numeric status code
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Canonical reason phrase, or `"Unknown Status Code"`.
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status Code")
    }
}

impl fmt::Display for StatusCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason())
    }
}

impl std::error::Error for StatusCodeError {}
