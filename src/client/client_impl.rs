//! `AssistantLinkClient` implementation
//!
//! Constructor, connection control, and the public widget API.

use std::sync::Arc;

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{LinkError, Result};
use crate::host::HostPage;
use crate::transport::WebSocketTransport;
use crate::types::{ConnectionState, SessionId, TranscriptMessage, WidgetConfig};
use crate::view::{ViewModel, render_shell, suggestion_prompt};

use super::state::Prepared;
use super::{EventSink, SendOutcome, WidgetEvent, WidgetState};

impl super::AssistantLinkClient {
    /// Initialize the widget on a host page and open the channel
    ///
    /// Inserts the widget shell into `host` exactly once, then starts the
    /// connection supervisor. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or `host` already carries
    /// a widget container
    pub fn initialize(config: WidgetConfig, host: &mut impl HostPage) -> Result<Self> {
        config.validate()?;
        if host.has_widget() {
            return Err(LinkError::AlreadyInitialized);
        }

        let mut client = Self::new(config);
        host.append_html(&client.render());
        client.connect()?;

        Ok(client)
    }

    /// Build a detached client without a host page or channel
    ///
    /// Call [`connect`](Self::connect) to open the channel.
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        Self {
            config,
            state: Arc::new(Mutex::new(WidgetState::new(SessionId::generate()))),
            outbound_tx,
            outbound_rx: Some(outbound_rx),
            events: EventSink::default(),
            event_rx: None,
            events_taken: false,
            shutdown: CancellationToken::new(),
            supervisor: None,
        }
    }

    /// Open the channel and keep it open
    ///
    /// Derives the channel URL from the configured endpoint and starts the
    /// supervisor, which reconnects after `reconnect_delay` on every failure or
    /// close. A no-op while a supervisor is already running.
    ///
    /// # Errors
    /// Returns error if the channel URL cannot be derived
    pub fn connect(&mut self) -> Result<()> {
        if self.supervisor.as_ref().is_some_and(|task| !task.is_finished()) {
            return Ok(());
        }
        let Some(outbound_rx) = self.outbound_rx.take() else {
            // A finished supervisor still owns the queue until `shutdown` reclaims it
            return Err(LinkError::Closed);
        };

        let transport = match WebSocketTransport::for_endpoint(&self.config.server_url) {
            Ok(transport) => transport,
            Err(e) => {
                self.outbound_rx = Some(outbound_rx);
                return Err(e);
            }
        };
        log::info!("[assistant-link] Connecting to: {}", transport.url());

        if self.shutdown.is_cancelled() {
            self.shutdown = CancellationToken::new();
        }

        {
            let mut state = self.state.lock();
            let emitted = state.set_connection(ConnectionState::Connecting);
            self.events.emit(emitted);
        }

        let task = tokio::spawn(Self::connection_supervisor(
            transport,
            self.state.clone(),
            outbound_rx,
            self.events.clone(),
            self.config.reconnect_delay(),
            self.shutdown.clone(),
        ));
        self.supervisor = Some(task);

        Ok(())
    }

    /// Send a user turn
    ///
    /// Uses `text` when it has any non-whitespace content, otherwise the trimmed
    /// input field value; a whitespace-only `text` falls back to the input field.
    /// Explicit text is sent as given, without trimming.
    /// Nothing is transmitted or recorded if the text is empty, the channel is
    /// not connected, or a reply is still streaming.
    ///
    /// # Errors
    /// Returns error if the envelope cannot be encoded or the client is shut down
    pub fn send(&self, text: Option<&str>) -> Result<SendOutcome> {
        let prepared = self.state.lock().begin_send(text)?;

        match prepared {
            Prepared::Frame(frame) => {
                self.outbound_tx
                    .send(frame)
                    .map_err(|_| LinkError::Closed)?;
                Ok(SendOutcome::Sent)
            }
            Prepared::Dropped(outcome) => {
                log::debug!("[assistant-link] Send dropped: {outcome:?}");
                Ok(outcome)
            }
        }
    }

    /// Send one of the configured suggested questions
    ///
    /// The decorative leading token (emoji) is stripped before sending.
    ///
    /// # Errors
    /// Returns `LinkError::InvalidConfig` if `index` is out of range, or any
    /// error from [`send`](Self::send)
    pub fn send_suggestion(&self, index: usize) -> Result<SendOutcome> {
        let question = self.config.suggested_questions.get(index).ok_or_else(|| {
            LinkError::invalid_config(format!("no suggested question at index {index}"))
        })?;
        self.send(Some(suggestion_prompt(question)))
    }

    /// Replace the input field value
    pub fn set_input(&self, text: &str) {
        self.state.lock().set_input(text);
    }

    /// Submit the input field, as pressing Enter does
    ///
    /// # Errors
    /// Same as [`send`](Self::send)
    pub fn submit_input(&self) -> Result<SendOutcome> {
        self.send(None)
    }

    /// Flip panel visibility
    pub fn toggle(&self) {
        let mut state = self.state.lock();
        let open = !state.is_open();
        state.set_open(open);
    }

    /// Show the panel; no-op if already open
    pub fn open(&self) {
        let mut state = self.state.lock();
        if !state.is_open() {
            state.set_open(true);
        }
    }

    /// Hide the panel; no-op if already closed
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.is_open() {
            state.set_open(false);
        }
    }

    /// Current view model snapshot
    #[must_use]
    pub fn view(&self) -> ViewModel {
        self.state.lock().view()
    }

    /// Render the widget container markup for the current state
    #[must_use]
    pub fn render(&self) -> String {
        render_shell(&self.config, &self.view())
    }

    /// Repaint the widget container on the host page
    pub fn paint(&self, host: &mut impl HostPage) {
        host.replace_widget(&self.render());
    }

    /// Current connection state
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.lock().connection()
    }

    /// Session identifier sent with every envelope
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.state.lock().session_id().clone()
    }

    /// Copy of the transcript so far
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptMessage> {
        self.state.lock().transcript().to_vec()
    }

    /// Options the widget was initialized with
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Get the next widget event
    ///
    /// The first call subscribes; its first event is the current connection
    /// state. Returns `None` once the receiver has been taken.
    pub async fn next_event(&mut self) -> Option<WidgetEvent> {
        if self.event_rx.is_none() && !self.events_taken {
            self.event_rx = Some(self.subscribe());
        }
        match self.event_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Take the event receiver to consume events elsewhere
    ///
    /// Subscribes if no receiver exists yet. Returns `None` on later calls.
    pub fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<WidgetEvent>> {
        if self.events_taken {
            return None;
        }
        self.events_taken = true;
        Some(self.event_rx.take().unwrap_or_else(|| self.subscribe()))
    }

    /// Take the events as a `Stream`
    pub fn event_stream(&mut self) -> Option<impl Stream<Item = WidgetEvent> + Send + 'static> {
        let mut rx = self.take_event_receiver()?;
        Some(async_stream::stream! {
            while let Some(event) = rx.recv().await {
                yield event;
            }
        })
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<WidgetEvent> {
        let state = self.state.lock();
        self.events.subscribe(state.connection())
    }

    /// Stop the supervisor and any armed reconnect timer
    ///
    /// Waits for the supervisor to finish, so no timer outlives this call.
    /// [`connect`](Self::connect) may be called again afterwards.
    pub async fn shutdown(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.supervisor.take() {
            match task.await {
                Ok(outbound_rx) => self.outbound_rx = Some(outbound_rx),
                Err(e) => {
                    log::error!("[assistant-link] Supervisor task failed: {e}");
                    // The queue died with the task; start a fresh one
                    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
                    self.outbound_tx = outbound_tx;
                    self.outbound_rx = Some(outbound_rx);
                }
            }
        }
    }
}

impl Drop for super::AssistantLinkClient {
    fn drop(&mut self) {
        // Ends the supervisor and releases any armed reconnect timer
        self.shutdown.cancel();
    }
}
