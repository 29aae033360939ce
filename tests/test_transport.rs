//! Integration tests for `WebSocketTransport`

mod common;

use std::time::Duration;

use assistant_link::{LinkError, Transport, WebSocketTransport, channel_url};
use common::{EVENT_TIMEOUT, TestServer, dead_endpoint};

#[test]
fn test_channel_url_derivation() {
    let cases = [
        ("http://localhost:8081", "ws://localhost:8081/ws"),
        ("https://agent.example.com", "wss://agent.example.com/ws"),
        ("https://agent.example.com:8443/", "wss://agent.example.com:8443/ws"),
        ("http://10.0.0.5:3000/ignored/path?q=1", "ws://10.0.0.5:3000/ws"),
    ];
    for (endpoint, expected) in cases {
        assert_eq!(channel_url(endpoint).unwrap().as_str(), expected, "{endpoint}");
    }
}

#[tokio::test]
async fn test_write_before_connect_fails() {
    let mut transport = WebSocketTransport::for_endpoint("http://localhost:8081").unwrap();
    assert!(!transport.is_ready());

    let err = tokio_test::assert_err!(transport.write("{}").await);
    assert!(matches!(err, LinkError::Transport(_)));
}

#[tokio::test]
async fn test_connect_to_dead_endpoint_fails() {
    let mut transport = WebSocketTransport::for_endpoint(&dead_endpoint().await).unwrap();

    let err = transport.connect().await.unwrap_err();
    assert!(err.is_channel_failure());
    assert!(!transport.is_ready());
}

#[tokio::test]
async fn test_frames_flow_both_ways() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut server = TestServer::start().await;
    let mut transport = WebSocketTransport::for_endpoint(&server.endpoint()).unwrap();

    transport.connect().await.unwrap();
    assert!(transport.is_ready());
    let mut conn = server.accept().await;
    let mut frames = transport.read_frames();

    transport.write(r#"{"ping":1}"#).await.unwrap();
    assert_eq!(conn.next_frame().await, r#"{"ping":1}"#);

    conn.push("chunk:a");
    conn.push("done");
    for expected in ["chunk:a", "done"] {
        let frame = tokio::time::timeout(EVENT_TIMEOUT, frames.recv())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(frame, expected);
    }

    // Server-side close ends the frame stream and clears readiness
    drop(conn);
    let end = tokio::time::timeout(EVENT_TIMEOUT, async {
        while let Some(item) = frames.recv().await {
            if item.is_err() {
                break;
            }
        }
    })
    .await;
    assert!(end.is_ok());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!transport.is_ready());

    transport.close().await.unwrap();
}

#[tokio::test]
async fn test_reconnect_same_transport() {
    let mut server = TestServer::start().await;
    let mut transport = WebSocketTransport::for_endpoint(&server.endpoint()).unwrap();

    tokio_test::assert_ok!(transport.connect().await);
    let _first = server.accept().await;
    tokio_test::assert_ok!(transport.close().await);
    assert!(!transport.is_ready());

    transport.connect().await.unwrap();
    let mut second = server.accept().await;
    transport.write("again").await.unwrap();
    assert_eq!(second.next_frame().await, "again");

    transport.close().await.unwrap();
}
