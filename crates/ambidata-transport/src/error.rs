//! Transport error types

use std::fmt;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while moving a request or response over the wire
#[derive(Debug)]
pub enum TransportError {
    /// HTTP protocol level error
    Http(String),

    /// Connection could not be established
    Connection(String),

    /// I/O error
    Io(std::io::Error),

    /// The transport's own deadline elapsed
    Timeout,

    /// The caller's cancellation token fired before the exchange finished
    Canceled,

    /// The request could not be built (bad URL, bad header, ...)
    InvalidRequest(String),

    /// Generic transport error
    Other(String),
}

impl TransportError {
    /// True when the exchange was aborted through a cancellation token.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// True when the underlying transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Io(err) => write!(f, "I/O error: {}", err),
            Self::Timeout => write!(f, "Timeout"),
            Self::Canceled => write!(f, "operation canceled"),
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
