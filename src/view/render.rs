//! Markup render functions

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::types::WidgetConfig;

use super::format::format_message;
use super::model::{ViewEntry, ViewModel};

/// `id` of the single top-level container owned by the widget
pub const WIDGET_CONTAINER_ID: &str = "assistant-link-widget";

/// Avatar label of visitor turns
const USER_AVATAR: &str = "YOU";

/// Strip the decorative leading token (usually an emoji) from a suggested question
///
/// `"💻 What are your technical skills?"` is sent as
/// `"What are your technical skills?"`. Questions without whitespace are kept.
#[must_use]
pub fn suggestion_prompt(question: &str) -> &str {
    match question.split_once(char::is_whitespace) {
        Some((head, rest)) if !head.is_empty() && !rest.trim().is_empty() => rest.trim_start(),
        _ => question,
    }
}

/// Render the whole widget: panel, transcript, input row and launcher
#[must_use]
pub fn render_shell(config: &WidgetConfig, view: &ViewModel) -> String {
    let window_class = if view.open { "agent-window open" } else { "agent-window" };
    let fab_class = if view.open { "agent-fab open" } else { "agent-fab" };
    let badge_class = if view.unread { "agent-badge show" } else { "agent-badge" };
    let disabled = if view.send_enabled { "" } else { " disabled" };
    let autofocus = if view.input_focused { " autofocus" } else { "" };

    let mut html = String::new();
    let _ = write!(
        html,
        concat!(
            "<div id=\"{id}\">",
            "<div class=\"{window_class}\">",
            "<div class=\"agent-header\">",
            "<div class=\"agent-avatar\">{avatar}</div>",
            "<div class=\"agent-info\"><h3>{name}</h3><p>{tagline}</p></div>",
            "<div class=\"agent-status {status}\"></div>",
            "</div>",
            "<div class=\"agent-messages\">{messages}</div>",
            "<div class=\"agent-input\">",
            "<input type=\"text\" placeholder=\"{placeholder}\" value=\"{input}\"{autofocus}/>",
            "<button{disabled}>Send</button>",
            "</div>",
            "</div>",
            "<button class=\"{fab_class}\">",
            "<span class=\"close-icon\">✕</span>",
            "<span class=\"{badge_class}\">1</span>",
            "</button>",
            "</div>"
        ),
        id = WIDGET_CONTAINER_ID,
        window_class = window_class,
        avatar = text(&config.avatar_text),
        name = text(&config.agent_name),
        tagline = text(&config.agent_tagline),
        status = view.status.as_str(),
        messages = render_messages(config, view),
        placeholder = attr(&config.placeholder),
        input = attr(&view.input),
        autofocus = autofocus,
        disabled = disabled,
        fab_class = fab_class,
        badge_class = badge_class,
    );
    html
}

/// Render the contents of the transcript area
///
/// Welcome panel (while visible), then every entry oldest first, then the
/// typing indicator if a reply is pending.
#[must_use]
pub fn render_messages(config: &WidgetConfig, view: &ViewModel) -> String {
    let mut html = String::new();

    if view.welcome_visible {
        let _ = write!(
            html,
            "<div class=\"agent-welcome\"><h4>{}</h4><p>{}</p><div class=\"agent-suggestions\">",
            text(&config.welcome_title),
            text(&config.welcome_message),
        );
        for question in &config.suggested_questions {
            let _ = write!(
                html,
                "<button class=\"agent-suggestion\" data-prompt=\"{}\">{}</button>",
                attr(suggestion_prompt(question)),
                text(question),
            );
        }
        html.push_str("</div></div>");
    }

    for entry in &view.entries {
        let (class, avatar) = match entry {
            ViewEntry::User(_) => ("user", USER_AVATAR),
            ViewEntry::Assistant(_) => ("agent", config.avatar_text.as_str()),
        };
        let _ = write!(
            html,
            "<div class=\"agent-message {class}\"><div class=\"agent-message-avatar\">{}</div><div class=\"agent-message-content\">{}</div></div>",
            text(avatar),
            format_message(entry.text()),
        );
    }

    if view.typing {
        let _ = write!(
            html,
            "<div class=\"agent-message agent\"><div class=\"agent-message-avatar\">{}</div><div class=\"agent-typing active\"><span></span><span></span><span></span></div></div>",
            text(&config.avatar_text),
        );
    }

    html
}
