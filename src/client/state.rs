//! Widget state and its transitions
//!
//! Every transition is synchronous and returns the events the host should be
//! told about, so the whole widget behavior is testable without a channel.

use crate::error::Result;
use crate::message::encode_envelope;
use crate::types::{ConnectionState, Envelope, InboundFrame, SessionId, TranscriptMessage};
use crate::view::{ViewEntry, ViewModel, format_message};

use super::{SendOutcome, WidgetEvent};

/// Result of preparing a send
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Prepared {
    /// Encoded envelope ready for the channel
    Frame(String),
    /// Nothing to transmit
    Dropped(SendOutcome),
}

/// Mutable state of one widget instance
#[derive(Debug)]
pub(crate) struct WidgetState {
    session_id: SessionId,
    transcript: Vec<TranscriptMessage>,
    connection: ConnectionState,
    /// Streaming reply buffer; `Some` once the reply container exists
    reply: Option<String>,
    typing: bool,
    send_enabled: bool,
    welcome_visible: bool,
    input: String,
    input_focused: bool,
    open: bool,
    unread: bool,
}

impl WidgetState {
    pub(crate) fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            transcript: Vec::new(),
            connection: ConnectionState::Disconnected,
            reply: None,
            typing: false,
            send_enabled: true,
            welcome_visible: true,
            input: String::new(),
            input_focused: false,
            open: false,
            unread: false,
        }
    }

    pub(crate) const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub(crate) fn transcript(&self) -> &[TranscriptMessage] {
        &self.transcript
    }

    pub(crate) const fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub(crate) fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    /// Resolve, record and encode an outbound user turn
    ///
    /// The explicit text wins unless it is blank, otherwise the trimmed input
    /// field value is used.
    pub(crate) fn begin_send(&mut self, explicit: Option<&str>) -> Result<Prepared> {
        let text = match explicit {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => self.input.trim().to_string(),
        };

        if text.is_empty() {
            return Ok(Prepared::Dropped(SendOutcome::Empty));
        }
        if !self.connection.is_connected() {
            return Ok(Prepared::Dropped(SendOutcome::NotConnected));
        }
        if !self.send_enabled {
            return Ok(Prepared::Dropped(SendOutcome::Busy));
        }

        self.welcome_visible = false;
        self.transcript.push(TranscriptMessage::user(text));
        self.reply = None;
        self.typing = true;
        self.send_enabled = false;
        self.input.clear();
        self.input_focused = true;

        let frame = encode_envelope(&Envelope {
            session_id: &self.session_id,
            messages: &self.transcript,
        })?;
        Ok(Prepared::Frame(frame))
    }

    /// Apply one inbound frame in delivery order
    pub(crate) fn apply_frame(&mut self, frame: InboundFrame) -> Vec<WidgetEvent> {
        match frame {
            InboundFrame::Chunk(chunk) => {
                let mut events = Vec::with_capacity(2);
                if self.reply.is_none() {
                    self.typing = false;
                    self.welcome_visible = false;
                    events.push(WidgetEvent::ReplyStarted);
                }
                let buffer = self.reply.get_or_insert_with(String::new);
                buffer.push_str(&chunk);
                events.push(WidgetEvent::ReplyUpdated {
                    text: buffer.clone(),
                    markup: format_message(buffer),
                });
                events
            }
            InboundFrame::Done => {
                let text = self.finish_reply();
                if !self.open && !text.is_empty() {
                    self.unread = true;
                }
                vec![WidgetEvent::ReplyCompleted { text }]
            }
        }
    }

    /// Record a connection state change
    ///
    /// Losing the channel mid-reply ends that reply: the typing indicator goes
    /// away, any partial text is kept, and send is enabled again.
    pub(crate) fn set_connection(&mut self, connection: ConnectionState) -> Vec<WidgetEvent> {
        if self.connection == connection {
            return Vec::new();
        }
        self.connection = connection;

        let mut events = vec![WidgetEvent::ConnectionChanged(connection)];
        if connection == ConnectionState::Disconnected && (self.typing || self.reply.is_some()) {
            let text = self.finish_reply();
            events.push(WidgetEvent::ReplyCompleted { text });
        }
        events
    }

    /// Close the in-flight reply and commit its text to the transcript
    fn finish_reply(&mut self) -> String {
        self.typing = false;
        self.send_enabled = true;
        let text = self.reply.take().unwrap_or_default();
        if !text.is_empty() {
            self.transcript.push(TranscriptMessage::assistant(text.clone()));
        }
        text
    }

    pub(crate) const fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
        if open {
            self.unread = false;
        }
    }

    pub(crate) fn view(&self) -> ViewModel {
        let mut entries: Vec<ViewEntry> = self
            .transcript
            .iter()
            .map(|message| match message.role {
                crate::types::Role::User => ViewEntry::User(message.content.clone()),
                crate::types::Role::Assistant => ViewEntry::Assistant(message.content.clone()),
            })
            .collect();
        if let Some(reply) = &self.reply {
            entries.push(ViewEntry::Assistant(reply.clone()));
        }

        ViewModel {
            status: self.connection,
            welcome_visible: self.welcome_visible,
            entries,
            typing: self.typing,
            send_enabled: self.send_enabled,
            input: self.input.clone(),
            input_focused: self.input_focused,
            open: self.open,
            unread: self.unread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn connected() -> WidgetState {
        let mut state = WidgetState::new(SessionId::new("session_1_abcdefghi"));
        state.set_connection(ConnectionState::Connected);
        state
    }

    fn chunk(text: &str) -> InboundFrame {
        InboundFrame::Chunk(text.to_string())
    }

    #[test]
    fn send_hello_records_turn_and_encodes_full_transcript() {
        let mut state = connected();
        let prepared = state.begin_send(Some("Hello")).unwrap();

        assert_eq!(state.transcript(), &[TranscriptMessage::user("Hello")]);
        assert_eq!(
            prepared,
            Prepared::Frame(
                r#"{"session_id":"session_1_abcdefghi","messages":[{"role":"user","content":"Hello"}]}"#
                    .to_string()
            )
        );

        let view = state.view();
        assert!(view.typing);
        assert!(!view.send_enabled);
        assert!(!view.welcome_visible);
        assert!(view.input_focused);
    }

    #[test]
    fn empty_sends_are_dropped() {
        let mut state = connected();
        assert_eq!(
            state.begin_send(Some("")).unwrap(),
            Prepared::Dropped(SendOutcome::Empty)
        );
        assert_eq!(
            state.begin_send(None).unwrap(),
            Prepared::Dropped(SendOutcome::Empty)
        );
        state.set_input("   ");
        assert_eq!(
            state.begin_send(None).unwrap(),
            Prepared::Dropped(SendOutcome::Empty)
        );
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn send_while_not_connected_never_appends() {
        for connection in [ConnectionState::Disconnected, ConnectionState::Connecting] {
            let mut state = WidgetState::new(SessionId::generate());
            state.set_connection(connection);
            assert_eq!(
                state.begin_send(Some("Hello")).unwrap(),
                Prepared::Dropped(SendOutcome::NotConnected)
            );
            assert!(state.transcript().is_empty());
        }
    }

    #[test]
    fn input_field_is_used_trimmed_and_cleared() {
        let mut state = connected();
        state.set_input("  Hi there  ");
        assert!(matches!(state.begin_send(None).unwrap(), Prepared::Frame(_)));
        assert_eq!(state.transcript()[0].content, "Hi there");
        assert!(state.view().input.is_empty());
    }

    #[test]
    fn blank_argument_falls_back_to_input_field() {
        let mut state = connected();
        state.set_input(" From input ");
        assert!(matches!(
            state.begin_send(Some("   ")).unwrap(),
            Prepared::Frame(_)
        ));
        assert_eq!(state.transcript()[0].content, "From input");

        state.apply_frame(InboundFrame::Done);
        state.begin_send(Some(" as typed ")).unwrap();
        assert_eq!(state.transcript()[1].content, " as typed ");
    }

    #[test]
    fn second_send_is_blocked_until_done() {
        let mut state = connected();
        state.begin_send(Some("First")).unwrap();
        assert_eq!(
            state.begin_send(Some("Second")).unwrap(),
            Prepared::Dropped(SendOutcome::Busy)
        );

        state.apply_frame(InboundFrame::Done);
        assert!(matches!(
            state.begin_send(Some("Second")).unwrap(),
            Prepared::Frame(_)
        ));
    }

    #[test]
    fn chunks_accumulate_and_done_completes() {
        let mut state = connected();
        state.begin_send(Some("Hello")).unwrap();

        let first = state.apply_frame(chunk("Hi "));
        assert_eq!(first[0], WidgetEvent::ReplyStarted);
        assert!(!state.view().typing);

        let second = state.apply_frame(chunk("there"));
        assert_eq!(
            second,
            vec![WidgetEvent::ReplyUpdated {
                text: "Hi there".to_string(),
                markup: "Hi there".to_string(),
            }]
        );

        let done = state.apply_frame(InboundFrame::Done);
        assert_eq!(
            done,
            vec![WidgetEvent::ReplyCompleted {
                text: "Hi there".to_string()
            }]
        );

        let view = state.view();
        assert!(view.send_enabled);
        assert!(!view.typing);
        assert_eq!(view.last_assistant_text(), Some("Hi there"));
        assert_eq!(state.transcript()[1].role, Role::Assistant);
    }

    #[test]
    fn next_envelope_carries_whole_conversation() {
        let mut state = connected();
        state.begin_send(Some("Hello")).unwrap();
        state.apply_frame(chunk("Hi"));
        state.apply_frame(InboundFrame::Done);

        let Prepared::Frame(frame) = state.begin_send(Some("More?")).unwrap() else {
            panic!("expected a frame");
        };
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        let roles: Vec<&str> = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }

    #[test]
    fn first_chunk_removes_welcome_panel() {
        let mut state = connected();
        assert!(state.view().welcome_visible);
        state.apply_frame(chunk("Unprompted"));
        assert!(!state.view().welcome_visible);
    }

    #[test]
    fn disconnect_mid_reply_re_enables_send() {
        let mut state = connected();
        state.begin_send(Some("Hello")).unwrap();
        state.apply_frame(chunk("Partial"));

        let events = state.set_connection(ConnectionState::Disconnected);
        assert_eq!(
            events,
            vec![
                WidgetEvent::ConnectionChanged(ConnectionState::Disconnected),
                WidgetEvent::ReplyCompleted {
                    text: "Partial".to_string()
                },
            ]
        );
        let view = state.view();
        assert!(view.send_enabled);
        assert!(!view.typing);
        assert_eq!(state.transcript().len(), 2);
    }

    #[test]
    fn unread_badge_set_while_closed_and_cleared_on_open() {
        let mut state = connected();
        state.begin_send(Some("Hello")).unwrap();
        state.apply_frame(chunk("Hi"));
        state.apply_frame(InboundFrame::Done);
        assert!(state.view().unread);

        state.set_open(true);
        assert!(!state.view().unread);

        state.begin_send(Some("Again")).unwrap();
        state.apply_frame(chunk("Hi again"));
        state.apply_frame(InboundFrame::Done);
        assert!(!state.view().unread);
    }

    #[test]
    fn repeated_connection_state_is_not_reported() {
        let mut state = connected();
        assert!(state.set_connection(ConnectionState::Connected).is_empty());
    }
}
