//! Opt-in delivery of widget events
//!
//! No channel exists until a host subscribes, so a host that only paints from
//! the view model never accumulates events. Subscribing replays the current
//! connection state first. A subscriber that drops its receiver is detached on
//! the next emit.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::types::ConnectionState;

use super::WidgetEvent;

/// Shared slot holding the current subscriber, if any
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSink {
    subscriber: Arc<Mutex<Option<mpsc::UnboundedSender<WidgetEvent>>>>,
}

impl EventSink {
    /// Attach a new subscriber, replacing any previous one
    ///
    /// Callers hold the widget state lock so `current` cannot go stale before
    /// the subscriber is installed.
    pub(crate) fn subscribe(
        &self,
        current: ConnectionState,
    ) -> mpsc::UnboundedReceiver<WidgetEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(WidgetEvent::ConnectionChanged(current));
        *self.subscriber.lock() = Some(tx);
        rx
    }

    /// Deliver events to the subscriber; without one they are discarded
    pub(crate) fn emit(&self, events: Vec<WidgetEvent>) {
        let mut slot = self.subscriber.lock();
        let Some(tx) = slot.as_ref() else {
            return;
        };
        for event in events {
            if tx.send(event).is_err() {
                log::debug!("[assistant-link] Event receiver dropped, detaching");
                *slot = None;
                return;
            }
        }
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        self.subscriber.lock().is_some()
    }
}
