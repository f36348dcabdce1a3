//! The chat widget controller.
//!
//! The widget holds only the ids of the elements it was bound to. Every
//! operation is handed the document, so all page mutation happens wherever
//! the caller owns the page (the UI event loop).

use crate::document::{locate, Document, ElementIds, InitError, InputControl, MessageSink};
use crate::markup::MarkupPolicy;
use crate::message::{EntryId, Message};
use crate::transport::{ChatReply, ChatTransport, RequestError};
use tracing::{error, info, warn};

/// Prefix of the bot entry shown when a request fails.
pub const FAILURE_PREFIX: &str = "Sorry, I couldn't connect to the server.";

/// Text of the bot entry for a failed request.
pub fn failure_text(error: &RequestError) -> String {
    format!("{FAILURE_PREFIX} {error}")
}

/// A submission whose request still has to be sent.
///
/// Produced by [`ChatWidget::submit`], consumed by [`ChatWidget::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a dispatch must be sent and resolved or the placeholder stays forever"]
pub struct Dispatch {
    message: String,
    placeholder: Option<EntryId>,
}

impl Dispatch {
    /// Trimmed message text to send.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Loading entry to remove when the request completes.
    pub fn placeholder(&self) -> Option<EntryId> {
        self.placeholder
    }
}

/// Controller wiring a form's submission to a chat transport.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    ids: ElementIds,
    markup: MarkupPolicy,
}

impl ChatWidget {
    /// Bind to the form, input and container named by `ids`.
    ///
    /// A missing element is logged as an error and returned; the caller is
    /// expected to carry on without a widget.
    pub fn bind<D: Document>(document: &D, ids: &ElementIds) -> Result<Self, InitError> {
        if let Err(e) = locate(document, ids) {
            error!("Error: Could not find one or more essential chat elements: {e}");
            return Err(e);
        }

        info!(form = %ids.form, input = %ids.input, container = %ids.container, "chat widget bound");
        Ok(Self {
            ids: ids.clone(),
            markup: MarkupPolicy::default(),
        })
    }

    /// Set how message text is turned into entry markup.
    #[must_use]
    pub fn with_markup(mut self, markup: MarkupPolicy) -> Self {
        self.markup = markup;
        self
    }

    /// Append one entry for `message` and scroll the container to its end.
    pub fn render<D: Document>(&self, document: &mut D, message: &Message) -> Option<EntryId> {
        let container = document.container_mut(&self.ids.container)?;
        let id = container.append(message.sender, self.markup.render(&message.text));
        container.scroll_to_end();
        Some(id)
    }

    /// Handle a form submission up to the point where the request is sent.
    ///
    /// Reads and trims the input; an empty message does nothing. Otherwise
    /// renders the user entry, clears the input and shows the loading
    /// placeholder.
    pub fn submit<D: Document>(&self, document: &mut D) -> Option<Dispatch> {
        let message = document.input(&self.ids.input)?.value().trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.render(document, &Message::user(message.as_str()));
        if let Some(input) = document.input_mut(&self.ids.input) {
            input.clear_value();
        }
        let placeholder = self.render(document, &Message::loading());

        info!(placeholder = ?placeholder, chars = message.chars().count(), "dispatching chat message");
        Some(Dispatch {
            message,
            placeholder,
        })
    }

    /// Apply the outcome of a dispatched request.
    ///
    /// Removes the placeholder, then renders the reply, the server's error,
    /// or the failure text. Returns the bot entry, if one was rendered.
    pub fn resolve<D: Document>(
        &self,
        document: &mut D,
        dispatch: Dispatch,
        outcome: Result<ChatReply, RequestError>,
    ) -> Option<EntryId> {
        if let Some(placeholder) = dispatch.placeholder {
            if let Some(container) = document.container_mut(&self.ids.container) {
                container.remove(placeholder);
            }
        }

        let text = match outcome {
            Ok(reply) => {
                let text = reply.bot_text();
                if text.is_none() {
                    info!(placeholder = ?dispatch.placeholder, "reply had neither response nor error");
                }
                text?
            }
            Err(e) => {
                warn!(placeholder = ?dispatch.placeholder, error = %e, "chat request failed");
                failure_text(&e)
            }
        };

        self.render(document, &Message::bot(text))
    }

    /// Submit and wait for the reply in one go.
    ///
    /// Returns `false` if nothing was submitted.
    pub async fn submit_with<D, T>(&self, document: &mut D, transport: &T) -> bool
    where
        D: Document,
        T: ChatTransport + ?Sized,
    {
        let Some(dispatch) = self.submit(document) else {
            return false;
        };
        let outcome = transport.send(dispatch.message().to_string()).await;
        self.resolve(document, dispatch, outcome);
        true
    }
}
