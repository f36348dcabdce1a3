//! The terminal page: one form, one input and one message container.

use chatline_core::{Document, ElementIds, Transcript};

use crate::input::TextInputState;

/// Elements of the terminal page, registered under configurable ids.
///
/// The form is the input bar itself; it has no state of its own.
#[derive(Debug, Clone)]
pub struct ChatPage {
    ids: ElementIds,
    pub input: TextInputState,
    pub transcript: Transcript,
}

impl ChatPage {
    pub fn new(ids: &ElementIds) -> Self {
        Self {
            ids: ids.clone(),
            input: TextInputState::new(),
            transcript: Transcript::new(),
        }
    }
}

impl Document for ChatPage {
    type Input = TextInputState;
    type Container = Transcript;

    fn has_form(&self, id: &str) -> bool {
        self.ids.form == id
    }

    fn input(&self, id: &str) -> Option<&TextInputState> {
        (self.ids.input == id).then_some(&self.input)
    }

    fn input_mut(&mut self, id: &str) -> Option<&mut TextInputState> {
        (self.ids.input == id).then_some(&mut self.input)
    }

    fn container(&self, id: &str) -> Option<&Transcript> {
        (self.ids.container == id).then_some(&self.transcript)
    }

    fn container_mut(&mut self, id: &str) -> Option<&mut Transcript> {
        (self.ids.container == id).then_some(&mut self.transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_found_by_id() {
        let page = ChatPage::new(&ElementIds::default());
        assert!(page.has_form("chat-form"));
        assert!(page.input("message-input").is_some());
        assert!(page.container("chat-messages").is_some());
        assert!(page.container("chatMessages").is_none());
    }
}
