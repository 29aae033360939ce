//! # Assistant Link
//!
//! Runtime of an embeddable chat widget that talks to a remote assistant
//! service. The client keeps a persistent WebSocket channel open, sends the
//! visitor's turns, and renders the assistant's reply incrementally as chunks
//! stream in.
//!
//! ## Quick Start
//!
//! ```no_run
//! use assistant_link::{AssistantLinkClient, MemoryPage, WidgetConfig, WidgetEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WidgetConfig::from_json_str(r#"{ "serverUrl": "https://agent.example.com" }"#)?;
//!     let mut page = MemoryPage::new();
//!     let mut client = AssistantLinkClient::initialize(config, &mut page)?;
//!
//!     while let Some(event) = client.next_event().await {
//!         match event {
//!             WidgetEvent::ConnectionChanged(state) if state.is_connected() => {
//!                 client.send(Some("What are your technical skills?"))?;
//!             }
//!             WidgetEvent::ReplyUpdated { text, .. } => log::info!("so far: {text}"),
//!             WidgetEvent::ReplyCompleted { .. } => break,
//!             _ => {}
//!         }
//!         client.paint(&mut page);
//!     }
//!
//!     client.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Wire protocol
//!
//! - Channel URL: `ws://host[:port]/ws`, or `wss://` when the configured
//!   endpoint is `https`.
//! - Outbound: one JSON text frame per send,
//!   `{"session_id": "...", "messages": [{"role": "user", "content": "..."}, ...]}`
//!   carrying the whole transcript. Completed assistant replies, and partial
//!   ones cut short by a disconnect, are part of the transcript, so a
//!   follow-up envelope reads `user, assistant, user`.
//! - Inbound: `chunk:<text>` fragments followed by the literal `done`.
//!
//! ## Architecture
//!
//! - [`types`]: identifiers, transcript/wire types, configuration
//! - [`message`]: inbound frame parsing and envelope encoding
//! - [`transport`]: channel abstraction and the WebSocket implementation
//! - [`view`]: view model, message formatting, markup rendering
//! - [`host`]: host page insertion point
//! - [`client`]: the widget client and its connection supervisor
//! - [`error`]: error types
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, LinkError>`](Result). Channel
//! failures never surface to the caller: they are logged and followed by a
//! reconnect after the configured fixed delay.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod host;
pub mod message;
pub mod transport;
pub mod types;
pub mod view;

// Re-export commonly used types for external API
pub use client::{AssistantLinkClient, SendOutcome, WidgetEvent};
pub use error::{LinkError, Result};
pub use host::{HostPage, MemoryPage};
pub use message::{encode_envelope, parse_frame};
pub use transport::{Transport, WebSocketTransport, channel_url};
pub use types::{
    ConnectionState, Envelope, InboundFrame, Role, SessionId, TranscriptMessage, WidgetConfig,
    WidgetConfigBuilder,
};
pub use view::{ViewEntry, ViewModel, format_message};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
