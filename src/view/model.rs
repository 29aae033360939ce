//! View model snapshot

use serde::Serialize;

use crate::types::ConnectionState;

/// One rendered turn in the transcript area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "text", rename_all = "lowercase")]
pub enum ViewEntry {
    /// A visitor turn, raw text
    User(String),
    /// An assistant turn (complete or still streaming), raw text
    Assistant(String),
}

impl ViewEntry {
    /// Raw text of the entry
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::User(text) | Self::Assistant(text) => text,
        }
    }
}

/// Everything a host needs to paint the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// Connection status indicator
    pub status: ConnectionState,
    /// Welcome panel still shown
    pub welcome_visible: bool,
    /// Rendered turns, oldest first; a streaming reply is the last entry
    pub entries: Vec<ViewEntry>,
    /// Typing indicator shown for the pending assistant turn
    pub typing: bool,
    /// Send affordance enabled
    pub send_enabled: bool,
    /// Current input field value
    pub input: String,
    /// Input field holds focus
    pub input_focused: bool,
    /// Chat panel visible
    pub open: bool,
    /// Unread badge shown on the launcher
    pub unread: bool,
}

impl ViewModel {
    /// Text of the newest assistant entry, if any
    #[must_use]
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.entries.iter().rev().find_map(|entry| match entry {
            ViewEntry::Assistant(text) => Some(text.as_str()),
            ViewEntry::User(_) => None,
        })
    }
}
