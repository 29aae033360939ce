//! Transport layer for the assistant channel
//!
//! This module provides the transport abstraction and the WebSocket
//! implementation used to talk to the remote assistant service.

pub mod websocket;

use tokio::sync::mpsc;

use crate::error::Result;

/// Transport trait for the assistant channel
///
/// A transport can be connected, closed, and connected again; the client's
/// supervisor reuses one transport across reconnects.
pub trait Transport: Send {
    /// Open the channel
    ///
    /// # Errors
    /// Returns error if the channel cannot be opened
    fn connect(&mut self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Write one text frame
    ///
    /// # Errors
    /// Returns error if the write fails or the transport is not ready
    fn write(&mut self, frame: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Read inbound text frames
    ///
    /// Spawns a background reader and returns a receiver yielding frames in
    /// delivery order. The receiver yields an error item if the channel fails
    /// and is closed once the channel ends.
    fn read_frames(&mut self) -> mpsc::UnboundedReceiver<Result<String>>;

    /// Check if the channel is open
    fn is_ready(&self) -> bool;

    /// Close the channel and release its resources
    ///
    /// # Errors
    /// Returns error if cleanup fails
    fn close(&mut self) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub use websocket::{WebSocketTransport, channel_url};
