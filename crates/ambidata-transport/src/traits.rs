//! Transport trait and the plain-data request/response types it exchanges

use crate::body::ResponseBody;
use crate::error::Result;
use ::http::{HeaderMap, HeaderName, HeaderValue, Method};
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use url::Url;

/// An HTTP request ready to hand to a transport
///
/// Represents a fully resolved HTTP request to be sent via the Transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,

    /// Absolute request URL including the encoded query
    pub url: Url,

    /// Request headers
    pub headers: HeaderMap,

    /// Request body (optional)
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// HTTP response
///
/// The status and headers are available immediately; the body is read on
/// demand and released when dropped.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Generic transport trait for anything that can carry one HTTP exchange.
///
/// Implementations must not retry on their own and must leave the
/// `User-Agent` header unset unless the request carries one explicitly.
/// Dropping the future returned by `send` must abort the exchange.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send an HTTP request and receive the response head.
    ///
    /// Any status code, including 4xx and 5xx, is a successful exchange at
    /// this layer; only failures to complete the exchange are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Short name for logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}
