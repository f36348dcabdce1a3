//! Message and entry types for the chat display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class shared by every rendered entry.
pub const ENTRY_CLASS: &str = "chat-message";

/// Content of the loading placeholder.
pub const LOADING_TEXT: &str = "...";

/// Who an entry belongs to. Controls the entry's visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Reply from the server.
    Bot,
    /// Placeholder shown while a request is in flight.
    BotLoading,
}

impl Sender {
    /// Tag used in class names (`user`, `bot`, `bot-loading`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::BotLoading => "bot-loading",
        }
    }

    /// Sender-specific class (`user-message`, `bot-message`, `bot-loading-message`).
    pub fn class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
            Self::BotLoading => "bot-loading-message",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A message before it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message text.
    pub text: String,
    /// Message author.
    pub sender: Sender,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    /// The loading placeholder.
    pub fn loading() -> Self {
        Self {
            text: LOADING_TEXT.into(),
            sender: Sender::BotLoading,
        }
    }
}

/// Handle to one entry in a container.
///
/// Ids are unique within a container and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One rendered message block in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Handle returned when the entry was appended.
    pub id: EntryId,
    /// Sender classifier.
    pub sender: Sender,
    /// Rendered markup (newlines already converted to `<br>`).
    pub content: String,
}

impl Entry {
    /// Both classes of the entry: the generic one, then the sender variant.
    pub fn classes(&self) -> [&'static str; 2] {
        [ENTRY_CLASS, self.sender.class()]
    }

    /// Check whether the entry carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_classes() {
        assert_eq!(Sender::User.class(), "user-message");
        assert_eq!(Sender::Bot.class(), "bot-message");
        assert_eq!(Sender::BotLoading.class(), "bot-loading-message");
    }

    #[test]
    fn test_sender_serializes_as_tag() {
        let json = serde_json::to_string(&Sender::BotLoading).unwrap();
        assert_eq!(json, "\"bot-loading\"");
    }

    #[test]
    fn test_entry_has_both_classes() {
        let entry = Entry {
            id: EntryId(1),
            sender: Sender::Bot,
            content: "Hello".into(),
        };
        assert!(entry.has_class("chat-message"));
        assert!(entry.has_class("bot-message"));
        assert!(!entry.has_class("user-message"));
    }

    #[test]
    fn test_loading_message() {
        let msg = Message::loading();
        assert_eq!(msg.text, "...");
        assert_eq!(msg.sender, Sender::BotLoading);
    }
}
