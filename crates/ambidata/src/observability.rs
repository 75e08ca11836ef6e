//! Centralized observability utilities for structured logging
//!
//! Every request the executor sends is logged through this layer. Only
//! sanitized queries are accepted, so credentials never reach a log field.

use crate::query::Query;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path
    pub path: String,
    /// Encoded query with credential keys removed
    pub query: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata. The query is sanitized here.
    pub fn new(method: impl Into<String>, path: impl Into<String>, query: &Query) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: query.sanitized().encode(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            query = %self.query,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code, absent when no response arrived
    pub status: Option<u16>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: Option<u16>, elapsed: Duration) -> Self {
        Self { status, elapsed }
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        debug!(
            method = %request.method,
            path = %request.path,
            query = %request.query,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            path = %request.path,
            query = %request.query,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metadata_strips_credentials() {
        let query: Query = [("readKey", "74545caba2bfd44f"), ("n", "10")]
            .into_iter()
            .collect();
        let metadata = RequestMetadata::new("GET", "/api/v2/channels/83601/data", &query);
        assert_eq!(metadata.method, "GET");
        assert_eq!(metadata.query, "n=10");
        assert_eq!(metadata.body_size, None);
    }

    #[test]
    fn test_request_metadata_with_body_size() {
        let metadata = RequestMetadata::new("POST", "/api/v2/channels/1/data", &Query::new())
            .with_body_size(1024);
        assert_eq!(metadata.body_size, Some(1024));
        assert_eq!(metadata.query, "");
    }

    #[test]
    fn test_response_metadata_creation() {
        let elapsed = Duration::from_millis(500);
        let metadata = ResponseMetadata::new(Some(200), elapsed);
        assert_eq!(metadata.status, Some(200));
        assert_eq!(metadata.elapsed, elapsed);
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed();
        assert!(elapsed.as_millis() >= 10);
    }
}
