//! Integration tests for transport failures, cancellation and timeouts

mod common;

use ambidata::{
    ApiErrorKind, CancellationToken, Config, Error, Fetcher, HttpTransportConfig, Manager, Sender,
    Transport, TransportError,
};
use ambidata_transport::{HttpRequest, HttpResponse, ResponseBody};
use assert_matches::assert_matches;
use async_trait::async_trait;
use bytes::Bytes;
use common::{CH, READ_KEY, USER_KEY, WRITE_KEY, mock_config, unreachable_config};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sends the response head at once, then streams `head` followed by
/// either an error or a body that never finishes.
#[derive(Debug)]
struct Stalling {
    head: &'static str,
    fail: bool,
}

#[async_trait]
impl Transport for Stalling {
    async fn send(&self, _request: HttpRequest) -> ambidata_transport::Result<HttpResponse> {
        let first = futures::stream::iter([Ok(Bytes::from_static(self.head.as_bytes()))]);
        let body = if self.fail {
            let rest = futures::stream::iter([Err(TransportError::Http("connection reset".into()))]);
            ResponseBody::new(futures::StreamExt::chain(first, rest))
        } else {
            ResponseBody::new(futures::StreamExt::chain(first, futures::stream::pending()))
        };
        Ok(HttpResponse::new(200, http::HeaderMap::new(), body))
    }
}

fn stalling_config(head: &'static str, fail: bool) -> Config {
    Config::builder()
        .transport(Arc::new(Stalling { head, fail }))
        .build()
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let fetcher = Fetcher::new(CH, READ_KEY).with_config(unreachable_config());
    let err = fetcher
        .get_channel(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_matches!(err, Error::Transport(_));
    assert!(!err.is_canceled());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_cancel_while_waiting_for_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let manager = Manager::new(USER_KEY).with_config(mock_config(&mock_server));
    let err = tokio::time::timeout(Duration::from_secs(10), manager.get_channel_list(&cancel))
        .await
        .expect("cancellation did not abort the request")
        .unwrap_err();

    assert!(err.is_canceled());
    assert_eq!(err.to_string(), "operation canceled");
}

#[tokio::test]
async fn test_transport_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&mock_server)
        .await;

    let config = Config::builder()
        .scheme("http")
        .host(mock_server.address().to_string())
        .http(HttpTransportConfig {
            timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        })
        .unwrap()
        .build();

    let sender = Sender::new(CH, WRITE_KEY).with_config(config);
    let err = sender
        .send(&Default::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(!err.is_canceled());
}

#[tokio::test]
async fn test_cancel_while_reading_body() {
    let fetcher = Fetcher::new(CH, READ_KEY).with_config(stalling_config("[{", false));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(10), fetcher.fetch_range(1, 0, &cancel))
        .await
        .expect("cancellation did not abort the body read")
        .unwrap_err();

    assert_matches!(err, Error::Transport(TransportError::Canceled));
}

#[tokio::test]
async fn test_cancel_while_scanning_write_body() {
    let sender = Sender::new(CH, WRITE_KEY).with_config(stalling_config("request", false));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(10),
        sender.send(&Default::default(), &cancel),
    )
    .await
    .expect("cancellation did not abort the marker scan")
    .unwrap_err();

    assert!(err.is_canceled());
}

#[tokio::test]
async fn test_body_read_failure_is_api_error() {
    let fetcher = Fetcher::new(CH, READ_KEY).with_config(stalling_config("[", true));
    let err = fetcher
        .fetch_range(1, 0, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_matches!(&err, Error::Api(api) => {
        assert_matches!(api.kind(), ApiErrorKind::Read(TransportError::Http(_)));
        assert_eq!(api.path(), "/api/v2/channels/83601/data");
        assert_eq!(api.query().get("n"), Some("1"));
        assert!(!api.query().contains_key("readKey"));
    });
}

#[tokio::test]
async fn test_decode_type_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"d1":"not a number"}"#))
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(CH, READ_KEY).with_config(mock_config(&mock_server));
    let err = fetcher
        .fetch_range(1, 0, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_matches!(&err, Error::Api(api) => {
        assert_matches!(api.kind(), ApiErrorKind::Decode(e) if e.is_data());
    });
    assert!(!err.to_string().contains(READ_KEY));
}
