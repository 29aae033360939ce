//! Message-related type definitions
//!
//! Transcript turns, the outbound envelope, and the inbound frame forms.

use serde::{Deserialize, Serialize};

use super::identifiers::SessionId;

/// Literal frame marking completion of an assistant turn
pub const DONE_MARKER: &str = "done";

/// Prefix of every streamed content frame
pub const CHUNK_PREFIX: &str = "chunk:";

/// Author of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Visitor typing into the widget
    User,
    /// Remote assistant service
    Assistant,
}

impl Role {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One role-tagged turn of the conversation transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Who produced the turn
    pub role: Role,
    /// Plain text of the turn
    pub content: String,
}

impl TranscriptMessage {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Payload sent on each `send`: the session and the entire transcript
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<'a> {
    /// Session the turns belong to
    pub session_id: &'a SessionId,
    /// Full transcript, not only the newest turn
    pub messages: &'a [TranscriptMessage],
}

/// Inbound frame sent by the assistant service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Incremental fragment of the streamed reply
    Chunk(String),
    /// The current reply is complete
    Done,
}
