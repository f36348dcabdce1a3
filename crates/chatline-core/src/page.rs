//! In-memory page with one form, one input and one container.
//!
//! Used by the one-shot CLI path and by tests.

use crate::document::{Document, ElementIds};
use crate::transcript::Transcript;

#[derive(Debug, Clone)]
pub struct MemoryPage {
    ids: ElementIds,
    /// Value of the text input.
    pub input: String,
    /// The message container.
    pub transcript: Transcript,
}

impl MemoryPage {
    /// Create a page whose elements carry the given ids.
    pub fn new(ids: &ElementIds) -> Self {
        Self {
            ids: ids.clone(),
            input: String::new(),
            transcript: Transcript::new(),
        }
    }

    /// Set the input value, as if the user typed it.
    #[must_use]
    pub fn with_input(mut self, value: impl Into<String>) -> Self {
        self.input = value.into();
        self
    }
}

impl Document for MemoryPage {
    type Input = String;
    type Container = Transcript;

    fn has_form(&self, id: &str) -> bool {
        self.ids.form == id
    }

    fn input(&self, id: &str) -> Option<&String> {
        (self.ids.input == id).then_some(&self.input)
    }

    fn input_mut(&mut self, id: &str) -> Option<&mut String> {
        (self.ids.input == id).then_some(&mut self.input)
    }

    fn container(&self, id: &str) -> Option<&Transcript> {
        (self.ids.container == id).then_some(&self.transcript)
    }

    fn container_mut(&mut self, id: &str) -> Option<&mut Transcript> {
        (self.ids.container == id).then_some(&mut self.transcript)
    }
}
