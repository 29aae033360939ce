//! WebSocket transport implementation

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::SinkExt;
use futures::stream::{SplitSink, SplitStream};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::error::{LinkError, Result};
use crate::transport::Transport;

use super::config::channel_url;

pub(super) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport to the assistant service
pub struct WebSocketTransport {
    pub(super) url: Url,
    pub(super) sink: Option<SplitSink<WsStream, Message>>,
    pub(super) stream: Option<SplitStream<WsStream>>,
    pub(super) ready: Arc<AtomicBool>,
    pub(super) reader_task: Option<JoinHandle<()>>,
}

impl WebSocketTransport {
    /// Create a transport for an already derived channel URL
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            sink: None,
            stream: None,
            ready: Arc::new(AtomicBool::new(false)),
            reader_task: None,
        }
    }

    /// Create a transport for a configured HTTP(S) endpoint
    ///
    /// # Errors
    /// Returns error if the channel URL cannot be derived
    pub fn for_endpoint(endpoint: &str) -> Result<Self> {
        Ok(Self::new(channel_url(endpoint)?))
    }

    /// Channel URL this transport connects to
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for WebSocketTransport {
    async fn connect(&mut self) -> Result<()> {
        self.connect_impl().await
    }

    async fn write(&mut self, frame: &str) -> Result<()> {
        if !self.is_ready() {
            return Err(LinkError::transport("Transport is not ready for writing"));
        }

        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| LinkError::transport("channel sink not available"))?;

        sink.send(Message::text(frame.to_owned()))
            .await
            .map_err(|e| LinkError::transport(format!("Failed to send frame: {e}")))
    }

    fn read_frames(&mut self) -> mpsc::UnboundedReceiver<Result<String>> {
        self.read_frames_impl()
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn close(&mut self) -> Result<()> {
        self.close_impl().await
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.drop_impl();
    }
}
