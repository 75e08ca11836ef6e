//! HTTP transport client implementation
//!
//! Implements the Transport trait on top of a pooled reqwest client. The
//! response body is handed back as a stream so nothing beyond what the caller
//! asks for is read.

use crate::body::ResponseBody;
use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as ReqwestClient;
use std::time::Duration;

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Connection pooling (shared across clones)
/// - Optional request timeout
/// - No `User-Agent` header
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client.
    ///
    /// The client must not be configured with a default `User-Agent`; the
    /// transport strips the header from each request but cannot undo
    /// client-level defaults.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> &ReqwestClient {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            mut headers,
            body,
        } = request;

        headers.remove(::http::header::USER_AGENT);

        let mut req = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from));

        tracing::trace!(status, transport = self.name(), "Response head received");

        Ok(HttpResponse::new(status, headers, ResponseBody::new(stream)))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Whole-request timeout; `None` leaves deadlines to the caller's
    /// cancellation token
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
        }
    }
}
