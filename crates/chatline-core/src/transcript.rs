//! Message container state.
//!
//! Scrolling is tracked as a distance from the end of the content, so the
//! container can be "at the end" independently of how wide the renderer makes
//! each line.

use crate::document::MessageSink;
use crate::message::{Entry, EntryId, Sender};

/// Ordered list of rendered entries plus scroll state.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: u64,
    /// Lines between the bottom of the viewport and the end of the content.
    scroll_back: usize,
    /// Largest valid `scroll_back`, as last measured by the renderer.
    max_scroll_back: usize,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of loading placeholders currently shown.
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.sender == Sender::BotLoading)
            .count()
    }

    /// Distance from the end, in rendered lines.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Whether the newest content is in view.
    pub fn is_at_end(&self) -> bool {
        self.scroll_back == 0
    }

    /// Record how far the renderer can scroll back (content lines minus
    /// viewport lines). Clamps the current position.
    pub fn set_extent(&mut self, content_lines: usize, viewport_lines: usize) {
        self.max_scroll_back = content_lines.saturating_sub(viewport_lines);
        self.scroll_back = self.scroll_back.min(self.max_scroll_back);
    }

    /// Scroll towards older entries.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_back = (self.scroll_back + amount).min(self.max_scroll_back);
    }

    /// Scroll towards newer entries.
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(amount);
    }
}

impl MessageSink for Transcript {
    fn append(&mut self, sender: Sender, content: String) -> EntryId {
        self.next_id += 1;
        let id = EntryId(self.next_id);
        self.entries.push(Entry {
            id,
            sender,
            content,
        });
        id
    }

    fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn scroll_to_end(&mut self) {
        self.scroll_back = 0;
    }

    fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
