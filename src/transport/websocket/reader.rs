//! Frame reading logic for the WebSocket transport

use std::sync::atomic::Ordering;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::error::{LinkError, Result};

use super::transport::WebSocketTransport;

impl WebSocketTransport {
    /// Spawn the reader task and hand back its frame receiver
    pub(super) fn read_frames_impl(&mut self) -> mpsc::UnboundedReceiver<Result<String>> {
        let (tx, rx) = mpsc::unbounded_channel();

        let stream = self.stream.take();
        let ready = self.ready.clone();

        let task = tokio::spawn(async move {
            let Some(mut stream) = stream else {
                let _ = tx.send(Err(LinkError::connection(
                    "Not connected - channel stream not available",
                )));
                return;
            };

            while let Some(message) = stream.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if tx.send(Ok(text.as_str().to_owned())).is_err() {
                            // Receiver dropped, stop reading
                            break;
                        }
                    }
                    Ok(Message::Close(frame)) => {
                        log::info!("[assistant-link] Server closed channel: {frame:?}");
                        break;
                    }
                    Ok(Message::Binary(data)) => {
                        log::debug!("[assistant-link] Ignoring {} byte binary frame", data.len());
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = tx.send(Err(LinkError::from(e)));
                        break;
                    }
                }
            }

            ready.store(false, Ordering::SeqCst);
        });

        self.reader_task = Some(task);

        rx
    }
}
