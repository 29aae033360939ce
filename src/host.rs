//! Host page abstraction
//!
//! The widget owns exactly one top-level container on the page it is embedded
//! in. Hosts implement [`HostPage`] to receive that container's markup and
//! later repaints of it.

use crate::view::WIDGET_CONTAINER_ID;

/// Insertion point provided by the embedding page
pub trait HostPage {
    /// Append markup at the end of the page body
    fn append_html(&mut self, markup: &str);

    /// Replace the widget container with freshly rendered markup
    fn replace_widget(&mut self, markup: &str);

    /// Whether a widget container is already present
    fn has_widget(&self) -> bool;
}

/// In-memory page used by the terminal front-end and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryPage {
    body: Vec<String>,
    widget_slot: Option<usize>,
}

impl MemoryPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full page body
    #[must_use]
    pub fn body(&self) -> String {
        self.body.concat()
    }

    /// Number of widget containers on the page
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.body()
            .matches(&format!("id=\"{WIDGET_CONTAINER_ID}\""))
            .count()
    }
}

impl HostPage for MemoryPage {
    fn append_html(&mut self, markup: &str) {
        if self.widget_slot.is_none() && markup.contains(WIDGET_CONTAINER_ID) {
            self.widget_slot = Some(self.body.len());
        }
        self.body.push(markup.to_string());
    }

    fn replace_widget(&mut self, markup: &str) {
        match self.widget_slot {
            Some(slot) => self.body[slot] = markup.to_string(),
            None => self.append_html(markup),
        }
    }

    fn has_widget(&self) -> bool {
        self.widget_slot.is_some()
    }
}
