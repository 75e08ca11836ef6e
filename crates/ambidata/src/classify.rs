//! Failure classification
//!
//! Turns the raw outcome of an exchange into either a usable response body or
//! an [`Error`]. Transport failures pass through untouched; everything else
//! becomes an [`ApiError`] tagged with the request it belongs to.
//!
//! The service has one non-standard failure mode: a write that is too large
//! is answered with status 200 and the literal body
//! `request entity too large`. Write paths therefore scan the body with
//! [`ErrorClassifier::classify_body_marker`] instead of ignoring it.

use crate::error::{ApiError, ApiErrorKind, Error, Result, StatusCodeError};
use crate::executor::{ClassifiedOutcome, RequestIntent};
use crate::query::Query;
use ambidata_transport::{ResponseBody, TransportError};
use http::Method;

/// Body the service sends with status 200 when it drops an oversized write.
pub const ENTITY_TOO_LARGE_MARKER: &[u8] = b"request entity too large";

/// Builds errors for one request.
#[derive(Debug, Clone, Copy)]
pub struct ErrorClassifier<'a> {
    method: &'a Method,
    path: &'a str,
    query: &'a Query,
}

impl<'a> ErrorClassifier<'a> {
    /// Classifier for an arbitrary request.
    pub fn new(method: &'a Method, path: &'a str, query: &'a Query) -> Self {
        Self {
            method,
            path,
            query,
        }
    }

    /// Classifier for the request described by `intent`.
    pub fn for_intent(intent: &'a RequestIntent) -> Self {
        Self::new(&intent.method, &intent.path, &intent.query)
    }

    /// Resolve an outcome into the body to read, or an error.
    pub fn classify(&self, outcome: ClassifiedOutcome) -> Result<ResponseBody> {
        match outcome {
            ClassifiedOutcome::Success(body) => Ok(body),
            ClassifiedOutcome::StatusFailure(code) => Err(self.classify_status(code).into()),
            ClassifiedOutcome::EntityTooLarge => {
                Err(self.api(ApiErrorKind::RequestEntityTooLarge).into())
            }
            ClassifiedOutcome::TransportFailure(e) => Err(Error::Transport(e)),
        }
    }

    /// Error for a non-200 status.
    pub fn classify_status(&self, code: u16) -> ApiError {
        self.api(ApiErrorKind::Status(StatusCodeError::new(code)))
    }

    /// Error for a body that is not the expected JSON.
    pub fn classify_decode(&self, err: serde_json::Error) -> ApiError {
        self.api(ApiErrorKind::Decode(err))
    }

    /// Error for a body that could not be read.
    ///
    /// A read cut short by cancellation stays a transport failure.
    pub fn classify_read(&self, err: TransportError) -> Error {
        if err.is_canceled() {
            Error::Transport(err)
        } else {
            self.api(ApiErrorKind::Read(err)).into()
        }
    }

    /// Scan the body of a successful write for the entity-too-large marker.
    ///
    /// Reads at most one byte past the marker length. A body shorter than the
    /// marker, a body that differs from it, or a body with anything after it
    /// is a success. A read error while filling the marker-sized prefix is
    /// reported; an error while probing past it is not.
    pub async fn classify_body_marker(&self, body: ResponseBody) -> Result<()> {
        let outcome = scan_body_marker(body)
            .await
            .map_err(|e| self.classify_read(e))?;
        self.classify(outcome).map(drop)
    }

    fn api(&self, kind: ApiErrorKind) -> ApiError {
        ApiError::new(self.method.clone(), self.path, self.query, kind)
    }
}

/// Compare the start of `body` against [`ENTITY_TOO_LARGE_MARKER`].
///
/// Only errors while filling the marker-sized prefix are reported; once the
/// prefix matched, failing to tell whether more bytes follow counts as
/// "more bytes follow".
async fn scan_body_marker(
    mut body: ResponseBody,
) -> std::result::Result<ClassifiedOutcome, TransportError> {
    let prefix = body.read_up_to(ENTITY_TOO_LARGE_MARKER.len()).await?;
    if prefix.len() < ENTITY_TOO_LARGE_MARKER.len() || &prefix[..] != ENTITY_TOO_LARGE_MARKER {
        return Ok(ClassifiedOutcome::Success(body));
    }

    match body.is_exhausted().await {
        Ok(true) => Ok(ClassifiedOutcome::EntityTooLarge),
        Ok(false) | Err(_) => Ok(ClassifiedOutcome::Success(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use bytes::Bytes;
    use rstest::rstest;

    fn body(parts: &[&'static str]) -> ResponseBody {
        let chunks: Vec<std::result::Result<Bytes, TransportError>> = parts
            .iter()
            .map(|p| Ok(Bytes::from_static(p.as_bytes())))
            .collect();
        ResponseBody::new(futures::stream::iter(chunks))
    }

    fn query() -> Query {
        [("writeKey", "575d743ebb4d2c2d"), ("level", "1")].into_iter().collect()
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::short(&["request entity too larg"])]
    #[case::longer(&["request entity too large!"])]
    #[case::longer_split(&["request entity too large", "\n"])]
    #[case::different(&["REQUEST ENTITY TOO LARGE"])]
    #[case::json(&["{}"])]
    #[tokio::test]
    async fn test_marker_scan_success(#[case] parts: &[&'static str]) {
        let q = query();
        let method = Method::POST;
        let classifier = ErrorClassifier::new(&method, "/api/v2/channels/1/data", &q);
        classifier.classify_body_marker(body(parts)).await.unwrap();
    }

    #[rstest]
    #[case::whole(&["request entity too large"])]
    #[case::split(&["request ", "entity too", " large"])]
    #[case::trailing_empty_chunks(&["request entity too large", "", ""])]
    #[tokio::test]
    async fn test_marker_scan_exact_match(#[case] parts: &[&'static str]) {
        let q = query();
        let method = Method::POST;
        let classifier = ErrorClassifier::new(&method, "/api/v2/channels/1/data", &q);
        let err = classifier.classify_body_marker(body(parts)).await.unwrap_err();

        assert!(err.is_request_entity_too_large());
        assert_eq!(
            err.to_string(),
            "ambidata: POST /api/v2/channels/1/data?level=1: request entity too large"
        );
    }

    #[tokio::test]
    async fn test_marker_scan_read_error() {
        let chunks: Vec<std::result::Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from_static(b"request")),
            Err(TransportError::Http("connection reset".into())),
        ];
        let q = Query::new();
        let method = Method::PUT;
        let classifier = ErrorClassifier::new(&method, "/p", &q);
        let err = classifier
            .classify_body_marker(ResponseBody::new(futures::stream::iter(chunks)))
            .await
            .unwrap_err();

        assert_matches!(err, Error::Api(ref e) if matches!(e.kind(), ApiErrorKind::Read(_)));
    }

    #[tokio::test]
    async fn test_marker_scan_tail_check_error_is_success() {
        let chunks: Vec<std::result::Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from_static(ENTITY_TOO_LARGE_MARKER)),
            Err(TransportError::Http("connection reset".into())),
        ];
        let q = Query::new();
        let method = Method::DELETE;
        let classifier = ErrorClassifier::new(&method, "/p", &q);
        classifier
            .classify_body_marker(ResponseBody::new(futures::stream::iter(chunks)))
            .await
            .unwrap();
    }

    #[rstest]
    #[case(404, "ambidata: GET /api/v2/channels/?level=1: 404 Not Found")]
    #[case(999, "ambidata: GET /api/v2/channels/?level=1: 999 Unknown Status Code")]
    fn test_classify_status(#[case] code: u16, #[case] expected: &str) {
        let q = query();
        let method = Method::GET;
        let classifier = ErrorClassifier::new(&method, "/api/v2/channels/", &q);
        let err = classifier.classify_status(code);
        assert_eq!(err.status(), Some(code));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_transport_failure_is_not_wrapped() {
        let q = query();
        let method = Method::GET;
        let classifier = ErrorClassifier::new(&method, "/", &q);
        let err = classifier
            .classify(ClassifiedOutcome::TransportFailure(TransportError::Canceled))
            .unwrap_err();
        assert_matches!(err, Error::Transport(TransportError::Canceled));
    }

    #[test]
    fn test_classify_read_keeps_cancellation() {
        let q = Query::new();
        let method = Method::GET;
        let classifier = ErrorClassifier::new(&method, "/", &q);
        assert_matches!(
            classifier.classify_read(TransportError::Canceled),
            Error::Transport(TransportError::Canceled)
        );
        assert_matches!(
            classifier.classify_read(TransportError::Timeout),
            Error::Api(_)
        );
    }

    #[test]
    fn test_classify_decode() {
        let q = Query::new();
        let method = Method::GET;
        let classifier = ErrorClassifier::new(&method, "/api/v2/channels/", &q);
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = classifier.classify_decode(decode);
        assert!(err.to_string().starts_with("ambidata: GET /api/v2/channels/: "));
        assert_matches!(err.kind(), ApiErrorKind::Decode(_));
    }
}
