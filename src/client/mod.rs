//! `AssistantLinkClient`: the embeddable chat widget's runtime
//!
//! The client owns everything one widget instance needs:
//! - the session identifier and the in-memory transcript
//! - connection state and the streaming reply buffer
//! - a supervisor task that owns the channel and reconnects after a fixed delay
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  AssistantLinkClient                      │
//! │                                                           │
//! │   send() ──┐                         ┌── next_event()     │
//! │            │   ┌────────────────┐    │                    │
//! │            ├──→│  WidgetState   │────┤  (view(), render())│
//! │            │   │ (parking_lot)  │    │                    │
//! │            │   └───────▲────────┘    │                    │
//! │  outbound  │           │ frames      │ events             │
//! │  envelopes ▼           │             │                    │
//! │   ┌──────────────────────────────────┴──┐                 │
//! │   │        Connection supervisor        │                 │
//! │   │ connect → pump frames → close →     │                 │
//! │   │ sleep(reconnect_delay) → connect …  │                 │
//! │   └─────────────────┬───────────────────┘                 │
//! │                     ▼                                     │
//! │              WebSocketTransport                           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The supervisor is the only owner of the transport, so inbound frames are
//! applied strictly in delivery order. The state lock is never held across an
//! `.await`.
//!
//! Events are opt-in: nothing is queued until the host first calls
//! `next_event`, `take_event_receiver` or `event_stream`, and the first event
//! a new subscriber sees is the current connection state.
//!
//! # Example
//!
//! ```no_run
//! use assistant_link::{AssistantLinkClient, MemoryPage, WidgetConfig, WidgetEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WidgetConfig::builder()
//!     .server_url("https://agent.example.com")
//!     .build();
//! let mut page = MemoryPage::new();
//! let mut client = AssistantLinkClient::initialize(config, &mut page)?;
//!
//! while let Some(event) = client.next_event().await {
//!     if let WidgetEvent::ConnectionChanged(state) = event
//!         && state.is_connected()
//!     {
//!         client.send(Some("Tell me about your projects"))?;
//!     }
//!     if let WidgetEvent::ReplyCompleted { text } = event {
//!         log::info!("Assistant: {text}");
//!         break;
//!     }
//! }
//!
//! client.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod client_impl;
mod events;
mod state;
mod tasks;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::types::{ConnectionState, WidgetConfig};

pub(crate) use events::EventSink;
pub(crate) use state::WidgetState;

/// Client for one embedded assistant widget
pub struct AssistantLinkClient {
    /// Options the widget was initialized with
    config: WidgetConfig,
    /// Transcript, connection state, streaming buffer and view flags
    state: Arc<Mutex<WidgetState>>,
    /// Envelopes waiting for the supervisor to write them
    outbound_tx: mpsc::UnboundedSender<String>,
    /// Parked outbound receiver while no supervisor is running
    outbound_rx: Option<mpsc::UnboundedReceiver<String>>,
    /// Event subscriber slot, shared with the supervisor
    events: EventSink,
    /// Receiver created by the first `next_event` call
    event_rx: Option<mpsc::UnboundedReceiver<WidgetEvent>>,
    /// Set once the receiver has been handed out
    events_taken: bool,
    /// Cancels the supervisor and any armed reconnect timer
    shutdown: CancellationToken,
    /// Running supervisor; yields the outbound receiver back when it stops
    supervisor: Option<JoinHandle<mpsc::UnboundedReceiver<String>>>,
}

/// Result of a `send` call
///
/// Dropped sends are silent towards the visitor; the outcome only tells the
/// caller why nothing was transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The envelope was queued for transmission
    Sent,
    /// Resolved text was empty
    Empty,
    /// The channel is not connected
    NotConnected,
    /// A reply is still streaming; the send affordance is disabled
    Busy,
}

/// Notification for the host page to repaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The status indicator changed
    ConnectionChanged(ConnectionState),
    /// First chunk of a reply arrived; its container now exists
    ReplyStarted,
    /// The streaming reply changed; `markup` is the full re-rendered content
    ReplyUpdated {
        /// Accumulated raw text
        text: String,
        /// Formatted markup of the accumulated text
        markup: String,
    },
    /// The reply finished; send is enabled again
    ReplyCompleted {
        /// Final raw text of the reply
        text: String,
    },
}
