//! Error types for the assistant link client

use thiserror::Error;

/// Main error type for the assistant link client
#[derive(Error, Debug)]
pub enum LinkError {
    /// Opening the channel to the assistant service failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transport layer error on an open channel
    #[error("Transport error: {0}")]
    Transport(String),

    /// Underlying WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The widget shell was already inserted into the host page
    #[error("Widget already initialized on this page")]
    AlreadyInitialized,

    /// The client has been shut down
    #[error("Client is shut down")]
    Closed,
}

/// Result type alias for assistant link operations
pub type Result<T> = std::result::Result<T, LinkError>;

impl LinkError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the error came from the channel rather than from local misuse.
    ///
    /// Channel failures all lead to the same reconnect path.
    #[must_use]
    pub const fn is_channel_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Transport(_) | Self::WebSocket(_) | Self::Io(_)
        )
    }
}
