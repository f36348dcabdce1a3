//! Host document binding.
//!
//! A document exposes elements by id: a form, a text input and a message
//! container. The widget resolves its three collaborators once at bind time
//! and is handed the document for every operation afterwards.

use crate::message::{Entry, EntryId, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of the message text.
pub trait InputControl {
    /// Current value.
    fn value(&self) -> String;

    /// Reset the value to empty.
    fn clear_value(&mut self);
}

/// Append target for rendered entries.
pub trait MessageSink {
    /// Append one entry and return its handle.
    fn append(&mut self, sender: Sender, content: String) -> EntryId;

    /// Remove an entry. Returns `false` if it was not present.
    fn remove(&mut self, id: EntryId) -> bool;

    /// Scroll so the newest entry is visible.
    fn scroll_to_end(&mut self);

    /// Entries in append order.
    fn entries(&self) -> &[Entry];
}

/// A page holding the elements the widget binds to.
pub trait Document {
    type Input: InputControl;
    type Container: MessageSink;

    /// Whether a submit-capable form with this id exists.
    fn has_form(&self, id: &str) -> bool;

    fn input(&self, id: &str) -> Option<&Self::Input>;

    fn input_mut(&mut self, id: &str) -> Option<&mut Self::Input>;

    fn container(&self, id: &str) -> Option<&Self::Container>;

    fn container_mut(&mut self, id: &str) -> Option<&mut Self::Container>;
}

/// Kind of element the widget needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Form,
    Input,
    Container,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Form => "form",
            Self::Input => "input",
            Self::Container => "container",
        })
    }
}

/// Element ids of the three collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_form_id")]
    pub form: String,

    #[serde(default = "default_input_id")]
    pub input: String,

    #[serde(default = "default_container_id")]
    pub container: String,
}

fn default_form_id() -> String {
    "chat-form".into()
}

fn default_input_id() -> String {
    "message-input".into()
}

fn default_container_id() -> String {
    "chat-messages".into()
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: default_form_id(),
            input: default_input_id(),
            container: default_container_id(),
        }
    }
}

/// Errors raised while binding the widget to a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// A required element is absent.
    #[error("Could not find the chat {kind} element `{id}`")]
    MissingElement { kind: ElementKind, id: String },
}

/// Check that every element in `ids` exists in the document.
pub fn locate<D: Document>(document: &D, ids: &ElementIds) -> Result<(), InitError> {
    let missing = |kind: ElementKind, id: &str| InitError::MissingElement {
        kind,
        id: id.to_string(),
    };

    if !document.has_form(&ids.form) {
        return Err(missing(ElementKind::Form, &ids.form));
    }
    if document.input(&ids.input).is_none() {
        return Err(missing(ElementKind::Input, &ids.input));
    }
    if document.container(&ids.container).is_none() {
        return Err(missing(ElementKind::Container, &ids.container));
    }
    Ok(())
}

impl InputControl for String {
    fn value(&self) -> String {
        self.clone()
    }

    fn clear_value(&mut self) {
        self.clear();
    }
}
