//! Background connection supervisor for `AssistantLinkClient`
//!
//! One supervisor runs per client. It owns the transport, applies inbound
//! frames, writes outbound envelopes, and re-opens the channel after a fixed
//! delay whenever it fails or closes. Cancelling the shutdown token stops it,
//! including while a reconnect is armed.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::message::parse_frame;
use crate::transport::Transport;
use crate::types::ConnectionState;

use super::{EventSink, WidgetState};

/// Why a connected session ended
enum SessionEnd {
    /// Channel failed or closed; reconnect
    Lost,
    /// Shutdown requested
    Shutdown,
}

impl super::AssistantLinkClient {
    /// Connection supervisor task
    ///
    /// Returns the outbound receiver so a later `connect` can start a new
    /// supervisor on the same queue.
    pub(super) async fn connection_supervisor<T: Transport>(
        mut transport: T,
        state: Arc<Mutex<WidgetState>>,
        mut outbound_rx: mpsc::UnboundedReceiver<String>,
        events: EventSink,
        reconnect_delay: Duration,
        shutdown: CancellationToken,
    ) -> mpsc::UnboundedReceiver<String> {
        loop {
            publish_connection(&state, &events, ConnectionState::Connecting);

            let opened = tokio::select! {
                () = shutdown.cancelled() => break,
                result = transport.connect() => result,
            };

            match opened {
                Ok(()) => {
                    log::info!("[assistant-link] Connected");
                    publish_connection(&state, &events, ConnectionState::Connected);

                    let end = Self::pump_session(
                        &mut transport,
                        &state,
                        &mut outbound_rx,
                        &events,
                        &shutdown,
                    )
                    .await;

                    if let Err(e) = transport.close().await {
                        log::warn!("[assistant-link] Error closing channel: {e}");
                    }
                    if matches!(end, SessionEnd::Shutdown) {
                        break;
                    }
                    log::info!("[assistant-link] Disconnected");
                }
                Err(e) => {
                    log::error!("[assistant-link] Connection failed: {e}");
                }
            }

            publish_connection(&state, &events, ConnectionState::Disconnected);

            // Envelopes queued for the lost channel are not replayed
            while let Ok(frame) = outbound_rx.try_recv() {
                log::warn!(
                    "[assistant-link] Dropping {} byte envelope queued before disconnect",
                    frame.len()
                );
            }

            log::debug!(
                "[assistant-link] Reconnecting in {} ms",
                reconnect_delay.as_millis()
            );
            tokio::select! {
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(reconnect_delay) => {}
            }
        }

        let _ = transport.close().await;
        publish_connection(&state, &events, ConnectionState::Disconnected);
        log::debug!("[assistant-link] Supervisor stopped");

        outbound_rx
    }

    /// Run one connected session until the channel ends or shutdown
    async fn pump_session<T: Transport>(
        transport: &mut T,
        state: &Arc<Mutex<WidgetState>>,
        outbound_rx: &mut mpsc::UnboundedReceiver<String>,
        events: &EventSink,
        shutdown: &CancellationToken,
    ) -> SessionEnd {
        let mut frames = transport.read_frames();

        loop {
            tokio::select! {
                () = shutdown.cancelled() => return SessionEnd::Shutdown,
                frame = frames.recv() => match frame {
                    Some(Ok(payload)) => apply_payload(state, events, &payload),
                    Some(Err(e)) => {
                        log::error!("[assistant-link] Channel error: {e}");
                        return SessionEnd::Lost;
                    }
                    None => return SessionEnd::Lost,
                },
                Some(envelope) = outbound_rx.recv() => {
                    if let Err(e) = write_envelope(transport, &envelope).await {
                        log::error!("[assistant-link] Failed to send envelope: {e}");
                        return SessionEnd::Lost;
                    }
                }
            }
        }
    }
}

async fn write_envelope<T: Transport>(transport: &mut T, envelope: &str) -> Result<()> {
    log::debug!("[assistant-link] Sending {} byte envelope", envelope.len());
    transport.write(envelope).await
}

fn apply_payload(state: &Mutex<WidgetState>, events: &EventSink, payload: &str) {
    let Some(frame) = parse_frame(payload) else {
        log::debug!("[assistant-link] Ignoring unrecognized frame: {payload:?}");
        return;
    };
    // Emit under the state lock so a concurrent subscribe sees a consistent snapshot
    let mut state = state.lock();
    let emitted = state.apply_frame(frame);
    events.emit(emitted);
}

pub(super) fn publish_connection(
    state: &Mutex<WidgetState>,
    events: &EventSink,
    connection: ConnectionState,
) {
    let mut state = state.lock();
    let emitted = state.set_connection(connection);
    events.emit(emitted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::WidgetEvent;
    use crate::types::SessionId;

    #[test]
    fn long_reply_without_subscriber_queues_nothing() {
        let state = Mutex::new(WidgetState::new(SessionId::generate()));
        let events = EventSink::default();
        publish_connection(&state, &events, ConnectionState::Connected);

        let chunk = format!("chunk:{}", "x".repeat(100));
        for _ in 0..500 {
            apply_payload(&state, &events, &chunk);
        }
        apply_payload(&state, &events, "done");

        assert!(!events.is_subscribed());
        let view = state.lock().view();
        assert_eq!(view.last_assistant_text().map(str::len), Some(50_000));
        assert!(view.send_enabled);
    }

    #[test]
    fn subscriber_sees_frames_in_delivery_order() {
        let state = Mutex::new(WidgetState::new(SessionId::generate()));
        let events = EventSink::default();
        publish_connection(&state, &events, ConnectionState::Connected);
        let mut rx = events.subscribe(state.lock().connection());

        apply_payload(&state, &events, "chunk:a");
        apply_payload(&state, &events, "garbage");
        apply_payload(&state, &events, "chunk:b");
        apply_payload(&state, &events, "done");

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        assert_eq!(
            received.first(),
            Some(&WidgetEvent::ConnectionChanged(ConnectionState::Connected))
        );
        assert_eq!(
            received.last(),
            Some(&WidgetEvent::ReplyCompleted {
                text: "ab".to_string()
            })
        );
        assert_eq!(received.len(), 5);
    }
}
