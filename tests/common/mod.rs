//! Local WebSocket server standing in for the assistant service

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use assistant_link::{AssistantLinkClient, WidgetEvent};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// How long a test waits for any single expected event
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// One accepted channel, driven by the test
pub struct ServerConn {
    /// Text frames received from the client
    pub inbound: mpsc::UnboundedReceiver<String>,
    /// Frames to push to the client; dropping it closes the channel
    pub outbound: mpsc::UnboundedSender<String>,
    /// When the handshake completed
    pub accepted_at: Instant,
}

impl ServerConn {
    pub fn push(&self, frame: &str) {
        self.outbound.send(frame.to_string()).unwrap();
    }

    pub async fn next_frame(&mut self) -> String {
        tokio::time::timeout(EVENT_TIMEOUT, self.inbound.recv())
            .await
            .expect("timed out waiting for a client frame")
            .expect("client channel ended")
    }
}

/// Test server accepting any number of channels on `/ws`
pub struct TestServer {
    pub addr: SocketAddr,
    connections: mpsc::UnboundedReceiver<ServerConn>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::bind("127.0.0.1:0".parse().unwrap()).await
    }

    /// Listen on a specific address, e.g. one a client is already retrying
    pub async fn bind(addr: SocketAddr) -> Self {
        let listener = TcpListener::bind(addr).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (conn_tx, connections) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
                    continue;
                };
                let (in_tx, inbound) = mpsc::unbounded_channel();
                let (outbound, mut out_rx) = mpsc::unbounded_channel::<String>();
                let conn = ServerConn {
                    inbound,
                    outbound,
                    accepted_at: Instant::now(),
                };
                if conn_tx.send(conn).is_err() {
                    break;
                }

                tokio::spawn(async move {
                    let (mut sink, mut stream) = ws.split();
                    loop {
                        tokio::select! {
                            message = stream.next() => match message {
                                Some(Ok(Message::Text(text))) => {
                                    let _ = in_tx.send(text.as_str().to_owned());
                                }
                                Some(Ok(_)) => {}
                                _ => break,
                            },
                            frame = out_rx.recv() => match frame {
                                Some(frame) => {
                                    if sink.send(Message::text(frame)).await.is_err() {
                                        break;
                                    }
                                }
                                None => {
                                    let _ = sink.send(Message::Close(None)).await;
                                    break;
                                }
                            },
                        }
                    }
                });
            }
        });

        Self { addr, connections }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn accept(&mut self) -> ServerConn {
        tokio::time::timeout(EVENT_TIMEOUT, self.connections.recv())
            .await
            .expect("timed out waiting for the client to connect")
            .expect("server stopped")
    }
}

/// A local address nothing listens on
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// An endpoint nothing listens on
pub async fn dead_endpoint() -> String {
    format!("http://{}", dead_addr().await)
}

/// Wait until the client emits an event matching `pred`
pub async fn wait_for(
    client: &mut AssistantLinkClient,
    mut pred: impl FnMut(&WidgetEvent) -> bool,
) -> WidgetEvent {
    tokio::time::timeout(EVENT_TIMEOUT, async {
        loop {
            let event = client.next_event().await.expect("event stream ended");
            if pred(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for widget event")
}

pub async fn wait_connected(client: &mut AssistantLinkClient) {
    wait_for(client, |event| {
        matches!(event, WidgetEvent::ConnectionChanged(state) if state.is_connected())
    })
    .await;
}
