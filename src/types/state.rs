//! Connection state of the assistant channel

use serde::{Deserialize, Serialize};

/// Lifecycle of the channel to the assistant service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No channel; a reconnect may be armed
    #[default]
    Disconnected,
    /// Channel open in progress
    Connecting,
    /// Channel open; sends are permitted
    Connected,
}

impl ConnectionState {
    /// Name used for the status indicator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }

    /// Whether `send` is permitted in this state
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
