//! WebSocket transport
//!
//! Opens `ws://host[:port]/ws` (or `wss://` for secure endpoints) with
//! `tokio-tungstenite` and exchanges text frames with the assistant service.

mod config;
mod lifecycle;
mod reader;
mod transport;

pub use config::{CHANNEL_PATH, CONNECT_TIMEOUT, channel_url};
pub use transport::WebSocketTransport;
