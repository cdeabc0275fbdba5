//! End-to-end tests of the reqwest transport against a local HTTP server
//!
//! The server mimics the broker's peek and get-message endpoints, including
//! header-carried metadata and batched bodies.

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use bytes::{BufMut, BytesMut};
use pulsar_admin_client::{ClientConfig, Error, PulsarAdmin};
use pulsar_admin_types::{MessageId, SingleMessageMetadata, TopicName};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const TOKEN: &str = "secret-token";

fn batch(payloads: &[&str]) -> Vec<u8> {
    let mut body = BytesMut::new();
    for (i, payload) in payloads.iter().enumerate() {
        let metadata = SingleMessageMetadata::new(payload.len() as u32)
            .with_property("seq", i.to_string())
            .encode()
            .unwrap();
        body.put_u32(metadata.len() as u32);
        body.put_slice(&metadata);
        body.put_slice(payload.as_bytes());
    }
    body.to_vec()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

/// Serves position 1 as a batch of two and position 2 as a single message
async fn peek(
    headers: HeaderMap,
    Path((_tenant, _ns, _topic, sub, position)): Path<(String, String, String, String, u64)>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }
    if sub != "reader" {
        return (
            StatusCode::NOT_FOUND,
            [("Content-Type", "application/json")],
            r#"{"reason":"Subscription not found"}"#,
        )
            .into_response();
    }

    match position {
        1 => (
            StatusCode::OK,
            [
                ("X-Pulsar-Message-ID", "7:0:-1:-1"),
                ("X-Pulsar-Num-Batch-Message", "2"),
                ("X-Pulsar-Publish-Time", "2024-05-01T10:00:00Z"),
            ],
            batch(&["first", "second"]),
        )
            .into_response(),
        2 => (
            StatusCode::OK,
            [
                ("X-Pulsar-Message-ID", "7:1:-1:-1"),
                ("X-Pulsar-Property-Source", "web"),
            ],
            "third",
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "").into_response(),
    }
}

async fn get_message(
    headers: HeaderMap,
    Path((_tenant, _ns, _topic, ledger, entry)): Path<(String, String, String, i64, i64)>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }
    let id = format!("{ledger}:{entry}:-1:-1");
    (
        StatusCode::OK,
        [
            ("X-Pulsar-Message-ID", id.as_str()),
            ("X-Pulsar-Num-Batch-Message", "3"),
        ],
        batch(&["a", "b", "c"]),
    )
        .into_response()
}

async fn start_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/admin/v2/persistent/:tenant/:ns/:topic/subscription/:sub/position/:position",
            get(peek),
        )
        .route(
            "/admin/v2/persistent/:tenant/:ns/:topic/ledger/:ledger/entry/:entry",
            get(get_message),
        );

    // Bind to any available port
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, server_handle)
}

fn admin(base_url: &str, token: Option<&str>) -> PulsarAdmin {
    let config = ClientConfig {
        web_service_url: base_url.to_string(),
        auth_token: token.map(str::to_string),
        ..Default::default()
    };
    PulsarAdmin::new(&config).unwrap()
}

#[tokio::test]
async fn test_peek_over_http() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();

    let (base_url, server_handle) = start_test_server().await;
    let topic = TopicName::parse("events").unwrap();

    let messages = admin(&base_url, Some(TOKEN))
        .subscriptions()
        .peek_messages(&topic, "reader", 3)
        .await
        .unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].payload, b"first");
    assert_eq!(messages[1].payload, b"second");
    assert_eq!(messages[2].payload, b"third");

    assert_eq!(messages[0].id, MessageId::new(7, 0).with_batch_index(0));
    assert_eq!(messages[1].id, MessageId::new(7, 0).with_batch_index(1));
    assert_eq!(messages[0].properties["seq"], "0");
    assert_eq!(messages[1].properties["seq"], "1");
    assert!(messages[0].publish_time().is_some());

    // Header names arrive lower-cased
    assert_eq!(messages[2].properties["source"], "web");
    assert!(!messages[2].properties.contains_key("seq"));

    server_handle.abort();
}

#[tokio::test]
async fn test_get_message_returns_first_of_batch() {
    let (base_url, server_handle) = start_test_server().await;
    let topic = TopicName::parse("events").unwrap();

    let message = admin(&base_url, Some(TOKEN))
        .subscriptions()
        .get_message_by_id(&topic, 12, 4)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(message.payload, b"a");
    assert_eq!(message.id, MessageId::new(12, 4).with_batch_index(0));

    server_handle.abort();
}

#[tokio::test]
async fn test_error_reason_is_surfaced() {
    let (base_url, server_handle) = start_test_server().await;
    let topic = TopicName::parse("events").unwrap();

    let err = admin(&base_url, Some(TOKEN))
        .subscriptions()
        .peek_messages(&topic, "nobody", 1)
        .await
        .unwrap_err();

    match err {
        Error::Http { status, reason } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(reason, "Subscription not found");
        }
        other => panic!("unexpected error: {other}"),
    }

    server_handle.abort();
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let (base_url, server_handle) = start_test_server().await;
    let topic = TopicName::parse("events").unwrap();

    let err = admin(&base_url, None)
        .subscriptions()
        .peek_messages(&topic, "reader", 1)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    server_handle.abort();
}

#[tokio::test]
async fn test_truncated_body_is_transport_read_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    // Promises 100 bytes, sends 5, then closes the connection
    let server_handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  X-Pulsar-Message-ID: 1:0:-1:-1\r\n\
                  Content-Length: 100\r\n\r\n\
                  hello",
            )
            .await
            .unwrap();
        let _ = socket.shutdown().await;
    });

    let topic = TopicName::parse("events").unwrap();
    let err = admin(&base_url, None)
        .subscriptions()
        .get_message_by_id(&topic, 1, 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::TransportRead(_)),
        "unexpected error: {err}"
    );

    server_handle.await.unwrap();
}
