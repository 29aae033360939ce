//! View model and markup rendering
//!
//! The client never touches a live document. It exposes a [`ViewModel`]
//! snapshot, and the pure functions here turn that snapshot (plus the widget
//! configuration) into markup a host page can paint.

mod format;
mod model;
mod render;

pub use format::format_message;
pub use model::{ViewEntry, ViewModel};
pub use render::{WIDGET_CONTAINER_ID, render_messages, render_shell, suggestion_prompt};
