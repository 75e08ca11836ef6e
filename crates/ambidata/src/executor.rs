//! Request execution
//!
//! [`RequestExecutor`] turns a [`RequestIntent`] into one HTTP exchange:
//! it resolves the configuration defaults, composes the URL, hands the
//! request to the transport and sorts the raw result into a
//! [`ClassifiedOutcome`]. Reading the body is left to the caller, which
//! either decodes it as JSON ([`RequestExecutor::execute_json`]) or scans it
//! for the entity-too-large marker ([`RequestExecutor::execute_write`]).

use crate::classify::ErrorClassifier;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use crate::query::Query;
use ambidata_transport::{CancellationToken, HttpRequest, ResponseBody, TransportError};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Path prefix of every channel endpoint.
pub const CHANNELS_PATH: &str = "/api/v2/channels/";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Path of a channel sub-resource, e.g. `channel_path("83601", "/data")`.
///
/// The channel id is escaped as a single path segment.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty channel id, which would
/// otherwise address the channel list.
pub fn channel_path(ch: &str, suffix: &str) -> Result<String> {
    if ch.is_empty() {
        return Err(Error::InvalidArgument("empty channel id".into()));
    }
    Ok(format!("{CHANNELS_PATH}{}{suffix}", urlencoding::encode(ch)))
}

/// Everything needed to build one request, before configuration defaults
/// are applied.
#[derive(Debug, Clone)]
pub struct RequestIntent {
    /// HTTP method
    pub method: Method,
    /// Absolute path, already escaped
    pub path: String,
    /// Query parameters, credentials included
    pub query: Query,
    /// Request body
    pub body: Option<Bytes>,
    /// Content type of `body`; ignored when there is no body
    pub content_type: Option<&'static str>,
}

impl RequestIntent {
    /// A request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            content_type: None,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>, query: Query) -> Self {
        Self::new(Method::GET, path).with_query(query)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>, query: Query) -> Self {
        Self::new(Method::DELETE, path).with_query(query)
    }

    /// A request carrying `value` as its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `value` cannot be represented as JSON,
    /// for example a NaN data value.
    pub fn json<T: Serialize + ?Sized>(
        method: Method,
        path: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let body = serde_json::to_vec(value).map_err(Error::Encode)?;
        Ok(Self::new(method, path).with_body(body, JSON_CONTENT_TYPE))
    }

    /// Replace the query.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Set the body and its content type.
    pub fn with_body(mut self, body: impl Into<Bytes>, content_type: &'static str) -> Self {
        self.body = Some(body.into());
        self.content_type = Some(content_type);
        self
    }
}

/// Raw result of one exchange.
#[derive(Debug)]
pub enum ClassifiedOutcome {
    /// Status 200; the body has not been read yet.
    Success(ResponseBody),
    /// Any other status. The body was dropped unread.
    StatusFailure(u16),
    /// Status 200 whose body was exactly the entity-too-large marker.
    EntityTooLarge,
    /// The exchange itself failed: network error, timeout or cancellation.
    TransportFailure(TransportError),
}

/// Sends requests according to a [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct RequestExecutor<'a> {
    config: &'a Config,
}

impl<'a> RequestExecutor<'a> {
    /// Executor for `config`.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Full URL for `intent` under the configured scheme and host.
    pub fn url(&self, intent: &RequestIntent) -> std::result::Result<Url, TransportError> {
        let base = format!(
            "{}://{}",
            self.config.scheme_or_default(),
            self.config.host_or_default()
        );
        let mut url = Url::parse(&base)
            .map_err(|e| TransportError::InvalidRequest(format!("{base}: {e}")))?;
        url.set_path(&intent.path);
        if !intent.query.is_empty() {
            url.set_query(Some(&intent.query.encode()));
        }
        Ok(url)
    }

    /// Perform one exchange.
    ///
    /// Cancelling `cancel` aborts the exchange and every later read of the
    /// returned body with [`TransportError::Canceled`].
    pub async fn execute(
        &self,
        intent: &RequestIntent,
        cancel: &CancellationToken,
    ) -> ClassifiedOutcome {
        let mut metadata =
            RequestMetadata::new(intent.method.as_str(), &intent.path, &intent.query);
        if let Some(body) = &intent.body {
            metadata = metadata.with_body_size(body.len());
        }
        metadata.log_request();

        let timer = RequestTimer::start();
        let outcome = self.exchange(intent, cancel).await;

        match &outcome {
            ClassifiedOutcome::Success(_) => {
                ResponseMetadata::new(Some(200), timer.elapsed()).log_success(&metadata);
            }
            ClassifiedOutcome::StatusFailure(code) => {
                ResponseMetadata::new(Some(*code), timer.elapsed())
                    .log_error(&metadata, "unexpected status");
            }
            ClassifiedOutcome::EntityTooLarge => {
                ResponseMetadata::new(Some(200), timer.elapsed())
                    .log_error(&metadata, "request entity too large");
            }
            ClassifiedOutcome::TransportFailure(e) => {
                ResponseMetadata::new(None, timer.elapsed())
                    .log_error(&metadata, &e.to_string());
            }
        }

        outcome
    }

    async fn exchange(
        &self,
        intent: &RequestIntent,
        cancel: &CancellationToken,
    ) -> ClassifiedOutcome {
        let transport = match self.config.transport_or_default() {
            Ok(t) => t,
            Err(e) => return ClassifiedOutcome::TransportFailure(e),
        };
        let url = match self.url(intent) {
            Ok(url) => url,
            Err(e) => return ClassifiedOutcome::TransportFailure(e),
        };

        let mut request = HttpRequest::new(intent.method.clone(), url);
        if let Some(body) = intent.body.as_ref().filter(|b| !b.is_empty()) {
            if let Some(content_type) = intent.content_type {
                let value = match HeaderValue::from_str(content_type) {
                    Ok(value) => value,
                    Err(e) => {
                        return ClassifiedOutcome::TransportFailure(TransportError::InvalidRequest(
                            format!("content type {content_type:?}: {e}"),
                        ));
                    }
                };
                request = request.with_header(CONTENT_TYPE, value);
            }
            request = request.with_body(body.clone());
        }

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Canceled),
            response = transport.send(request) => response,
        };

        match response {
            Err(e) => ClassifiedOutcome::TransportFailure(e),
            // dropping the response releases the body unread
            Ok(response) if response.status != 200 => {
                ClassifiedOutcome::StatusFailure(response.status)
            }
            Ok(response) => {
                ClassifiedOutcome::Success(response.body.with_cancellation(cancel.clone()))
            }
        }
    }

    /// Perform a read: execute, then decode the body as JSON.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        intent: &RequestIntent,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let classifier = ErrorClassifier::for_intent(intent);
        let body = classifier.classify(self.execute(intent, cancel).await)?;
        let bytes = body.bytes().await.map_err(|e| classifier.classify_read(e))?;

        // Only the first JSON value counts; trailing bytes are ignored.
        let mut de = serde_json::Deserializer::from_slice(&bytes);
        T::deserialize(&mut de).map_err(|e| classifier.classify_decode(e).into())
    }

    /// Perform a write: execute, then scan the body for the
    /// entity-too-large marker.
    pub async fn execute_write(
        &self,
        intent: &RequestIntent,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let classifier = ErrorClassifier::for_intent(intent);
        let body = classifier.classify(self.execute(intent, cancel).await)?;
        classifier.classify_body_marker(body).await
    }
}
