//! Widget configuration
//!
//! Every option is optional on input; missing keys fall back to the defaults
//! below. The JSON surface uses the camelCase keys a host page would pass to
//! the embeddable script (`serverUrl`, `reconnectDelay`, ...).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// Default assistant endpoint
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8081";

/// Default fixed delay between reconnect attempts, in milliseconds
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3000;

// ============================================================================
// Widget Config
// ============================================================================

/// Options consumed by `initialize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// HTTP(S) endpoint of the assistant service; the channel URL is derived from it
    pub server_url: String,
    /// Fixed delay before each reconnect attempt, in milliseconds
    #[serde(rename = "reconnectDelay")]
    pub reconnect_delay_ms: u64,
    /// Short label shown in the avatar bubble
    pub avatar_text: String,
    /// Display name in the header
    pub agent_name: String,
    /// Tagline under the display name
    pub agent_tagline: String,
    /// Placeholder of the input field
    pub placeholder: String,
    /// Heading of the welcome panel
    pub welcome_title: String,
    /// Body of the welcome panel
    pub welcome_message: String,
    /// Starter questions offered on the welcome panel
    pub suggested_questions: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            avatar_text: "AI".to_string(),
            agent_name: "AI Assistant".to_string(),
            agent_tagline: "Ask about skills, projects & more".to_string(),
            placeholder: "Ask about my experience...".to_string(),
            welcome_title: "👋 Hi there!".to_string(),
            welcome_message: "I'm an AI assistant. Ask me anything about background, skills, or projects."
                .to_string(),
            suggested_questions: vec![
                "💻 What are your technical skills?".to_string(),
                "🚀 Tell me about your projects".to_string(),
                "🎯 What kind of roles are you seeking?".to_string(),
            ],
        }
    }
}

impl WidgetConfig {
    /// Create a new builder for `WidgetConfig`
    #[must_use]
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::default()
    }

    /// Parse a JSON configuration object, applying defaults for missing keys
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or the result fails validation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Check that the endpoint is usable
    ///
    /// # Errors
    /// Returns `LinkError::InvalidConfig` for an empty or host-less `serverUrl`
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(LinkError::invalid_config("serverUrl is empty"));
        }
        crate::transport::channel_url(&self.server_url).map(|_| ())
    }

    /// Reconnect delay as a `Duration`
    #[must_use]
    pub const fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

// ============================================================================
// Builder for WidgetConfig
// ============================================================================

/// Builder for `WidgetConfig`
#[derive(Debug, Default)]
pub struct WidgetConfigBuilder {
    config: WidgetConfig,
}

impl WidgetConfigBuilder {
    /// Set the assistant endpoint
    #[must_use]
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = url.into();
        self
    }

    /// Set the reconnect delay
    #[must_use]
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.config.reconnect_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the avatar label
    #[must_use]
    pub fn avatar_text(mut self, text: impl Into<String>) -> Self {
        self.config.avatar_text = text.into();
        self
    }

    /// Set the display name
    #[must_use]
    pub fn agent_name(mut self, name: impl Into<String>) -> Self {
        self.config.agent_name = name.into();
        self
    }

    /// Set the tagline
    #[must_use]
    pub fn agent_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.config.agent_tagline = tagline.into();
        self
    }

    /// Set the input placeholder
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    /// Set the welcome panel title and body
    #[must_use]
    pub fn welcome(mut self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.config.welcome_title = title.into();
        self.config.welcome_message = message.into();
        self
    }

    /// Replace the suggested starter questions
    #[must_use]
    pub fn suggested_questions(mut self, questions: Vec<impl Into<String>>) -> Self {
        self.config.suggested_questions = questions.into_iter().map(Into::into).collect();
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> WidgetConfig {
        self.config
    }
}
