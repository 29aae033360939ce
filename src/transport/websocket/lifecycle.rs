//! Lifecycle management for the WebSocket transport (connect, close)

use std::sync::atomic::Ordering;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::{LinkError, Result};

use super::config::CONNECT_TIMEOUT;
use super::transport::WebSocketTransport;

impl WebSocketTransport {
    /// Open the channel
    ///
    /// # Errors
    /// Returns error if the handshake fails or times out
    pub(super) async fn connect_impl(&mut self) -> Result<()> {
        if self.ready.load(Ordering::SeqCst) {
            return Ok(());
        }

        // Drop leftovers of a previous session before reopening
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
        self.sink = None;
        self.stream = None;

        let (ws_stream, _response) =
            tokio::time::timeout(CONNECT_TIMEOUT, connect_async(self.url.as_str()))
                .await
                .map_err(|_| {
                    LinkError::connection(format!("Timed out connecting to {}", self.url))
                })?
                .map_err(|e| LinkError::connection(format!("Failed to connect to {}: {e}", self.url)))?;

        let (sink, stream) = ws_stream.split();
        self.sink = Some(sink);
        self.stream = Some(stream);
        self.ready.store(true, Ordering::SeqCst);

        Ok(())
    }

    /// Close the channel and clean up resources
    ///
    /// # Errors
    /// Never fails today; close errors from the peer are ignored
    pub(super) async fn close_impl(&mut self) -> Result<()> {
        self.ready.store(false, Ordering::SeqCst);

        if let Some(mut sink) = self.sink.take() {
            let _ = sink.send(Message::Close(None)).await;
            let _ = sink.close().await;
        }

        if let Some(task) = self.reader_task.take() {
            task.abort();
        }

        self.stream = None;

        Ok(())
    }

    /// Handle Drop cleanup
    pub(super) fn drop_impl(&mut self) {
        self.ready.store(false, Ordering::SeqCst);

        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
    }
}
