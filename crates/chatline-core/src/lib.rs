//! chatline-core: Chat widget controller and `/chat` transport
//!
//! This crate provides everything below the terminal layer:
//! - Message and entry types
//! - Entry markup rendering (newline to `<br>`)
//! - Document binding and the message container
//! - The [`ChatWidget`] controller
//! - HTTP transport and configuration

pub mod config;
pub mod document;
pub mod markup;
pub mod message;
pub mod page;
pub mod transcript;
pub mod transport;
pub mod widget;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use document::{Document, ElementIds, ElementKind, InitError, InputControl, MessageSink};
pub use markup::MarkupPolicy;
pub use message::{Entry, EntryId, Message, Sender};
pub use page::MemoryPage;
pub use transcript::Transcript;
pub use transport::{ChatReply, ChatRequest, ChatTransport, HttpTransport, RequestError, SendFuture};
pub use widget::{failure_text, ChatWidget, Dispatch, FAILURE_PREFIX};

/// Returns the core version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_version() {
        let version = core_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
