//! Application state and update logic for the chatline TUI.

use chatline_core::{ChatReply, ChatWidget, Config, Dispatch, InitError, RequestError};
use ratatui::layout::Rect;
use tracing::debug;

use crate::event::Action;
use crate::page::ChatPage;
use crate::theme::Theme;
use crate::ui;
use crate::widgets::{transcript_lines, InputBar, TranscriptView};

/// Lines scrolled per mouse wheel tick.
pub const WHEEL_SCROLL_LINES: usize = 3;

/// Application state.
#[derive(Debug)]
pub struct App {
    /// The page the widget binds to.
    pub page: ChatPage,

    /// Bound widget, or `None` when binding failed and the page is inert.
    widget: Option<ChatWidget>,

    /// Why binding failed, if it did.
    pub init_error: Option<InitError>,

    /// Endpoint shown in the status bar.
    pub endpoint: String,

    /// Requests dispatched and not yet resolved.
    pub in_flight: usize,

    /// Lines visible in the conversation pane, as of the last layout.
    viewport_lines: usize,

    pub theme: Theme,

    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Build the page from `config.page` and bind the widget with `config.widget`.
    pub fn new(config: &Config, endpoint: impl Into<String>) -> Self {
        let page = ChatPage::new(&config.page);
        let (widget, init_error) = match ChatWidget::bind(&page, &config.widget) {
            Ok(widget) => (Some(widget.with_markup(config.markup)), None),
            Err(e) => (None, Some(e)),
        };

        Self {
            page,
            widget,
            init_error,
            endpoint: endpoint.into(),
            in_flight: 0,
            viewport_lines: 0,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    /// Whether a widget is bound to the page.
    pub fn is_bound(&self) -> bool {
        self.widget.is_some()
    }

    /// Apply a key action. Returns a dispatch when the form was submitted.
    pub fn handle_action(&mut self, action: Action) -> Option<Dispatch> {
        let input = &mut self.page.input;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => return self.submit(),
            Action::Newline => input.insert('\n'),
            Action::Insert(c) => input.insert(c),
            Action::Backspace => input.backspace(),
            Action::Delete => input.delete(),
            Action::Left => input.move_left(),
            Action::Right => input.move_right(),
            Action::Home => input.move_home(),
            Action::End => input.move_end(),
            Action::Up => {
                if input.is_empty() || input.is_browsing_history() {
                    input.history_prev();
                } else {
                    self.page.transcript.scroll_up(1);
                }
            }
            Action::Down => {
                if input.is_browsing_history() {
                    input.history_next();
                } else {
                    self.page.transcript.scroll_down(1);
                }
            }
            Action::PageUp => self.page.transcript.scroll_up(self.page_size()),
            Action::PageDown => self.page.transcript.scroll_down(self.page_size()),
            Action::None => {}
        }
        None
    }

    /// Insert pasted text at the cursor, newlines included.
    pub fn paste(&mut self, text: &str) {
        self.page.input.insert_str(text);
    }

    /// Mouse wheel scrolling of the conversation pane.
    pub fn scroll_wheel(&mut self, up: bool) {
        if up {
            self.page.transcript.scroll_up(WHEEL_SCROLL_LINES);
        } else {
            self.page.transcript.scroll_down(WHEEL_SCROLL_LINES);
        }
    }

    fn page_size(&self) -> usize {
        self.viewport_lines.saturating_sub(1).max(1)
    }

    /// Submit the form through the widget.
    pub fn submit(&mut self) -> Option<Dispatch> {
        let Some(widget) = &self.widget else {
            debug!("submit ignored: no widget bound");
            return None;
        };

        let dispatch = widget.submit(&mut self.page)?;
        self.in_flight += 1;
        Some(dispatch)
    }

    /// Apply the outcome of a dispatched request.
    pub fn resolve(&mut self, dispatch: Dispatch, outcome: Result<ChatReply, RequestError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(widget) = &self.widget {
            widget.resolve(&mut self.page, dispatch, outcome);
        }
    }

    /// Measure the conversation pane for `area` so scrolling stays in range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn sync_layout(&mut self, area: Rect) {
        let layout = ui::layout(area, InputBar::height_for(&self.page.input));
        let inner = TranscriptView::inner(layout.transcript);
        let total = transcript_lines(&self.page.transcript, inner.width as usize, &self.theme).len();

        self.viewport_lines = inner.height as usize;
        self.page.transcript.set_extent(total, self.viewport_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, type_text};
    use chatline_core::{ElementIds, MessageSink, Sender};

    #[test]
    fn test_app_binds_with_default_ids() {
        let app = create_test_app();
        assert!(app.is_bound());
        assert!(app.init_error.is_none());
    }

    #[test]
    fn test_mismatched_ids_leave_page_inert() {
        let config = Config {
            widget: ElementIds {
                input: "chat-input".into(),
                ..ElementIds::default()
            },
            ..Config::default()
        };
        let mut app = App::new(&config, "http://127.0.0.1:5000/chat");
        assert!(!app.is_bound());
        assert!(app.init_error.is_some());

        // Typing still works, submitting does nothing
        type_text(&mut app, "Hi");
        assert!(app.handle_action(Action::Submit).is_none());
        assert_eq!(app.page.input.content(), "Hi");
        assert!(app.page.transcript.is_empty());
    }

    #[test]
    fn test_submit_and_resolve() {
        let mut app = create_test_app();
        type_text(&mut app, "Hi");

        let dispatch = app.handle_action(Action::Submit).unwrap();
        assert_eq!(dispatch.message(), "Hi");
        assert_eq!(app.in_flight, 1);
        assert!(app.page.input.is_empty());

        app.resolve(dispatch, Ok(ChatReply::response("Hello!")));
        assert_eq!(app.in_flight, 0);
        let senders: Vec<Sender> = app.page.transcript.entries().iter().map(|e| e.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
    }

    #[test]
    fn test_blank_submit_does_not_count() {
        let mut app = create_test_app();
        type_text(&mut app, "   ");
        assert!(app.handle_action(Action::Submit).is_none());
        assert_eq!(app.in_flight, 0);
    }

    #[test]
    fn test_newline_action() {
        let mut app = create_test_app();
        type_text(&mut app, "a");
        app.handle_action(Action::Newline);
        type_text(&mut app, "b");
        assert_eq!(app.page.input.content(), "a\nb");
    }

    #[test]
    fn test_up_down_walk_history() {
        let mut app = create_test_app();
        type_text(&mut app, "first");
        let _ = app.handle_action(Action::Submit);

        app.handle_action(Action::Up);
        assert_eq!(app.page.input.content(), "first");

        app.handle_action(Action::Down);
        assert!(app.page.input.is_empty());
    }

    #[test]
    fn test_page_keys_scroll_transcript() {
        let mut app = create_test_app();
        for i in 0..30 {
            app.page.transcript.append(Sender::Bot, format!("line {i}"));
        }
        app.sync_layout(Rect::new(0, 0, 80, 24));

        app.handle_action(Action::PageUp);
        assert!(!app.page.transcript.is_at_end());

        app.handle_action(Action::PageDown);
        assert!(app.page.transcript.is_at_end());
    }

    #[test]
    fn test_paste_keeps_newlines() {
        let mut app = create_test_app();
        type_text(&mut app, "> ");
        app.paste("Mon: DBMS\r\nTue: OS");
        assert_eq!(app.page.input.content(), "> Mon: DBMS\nTue: OS");

        let dispatch = app.handle_action(Action::Submit).unwrap();
        assert_eq!(dispatch.message(), "> Mon: DBMS\nTue: OS");
        assert_eq!(app.page.transcript.entries()[0].content, "> Mon: DBMS<br>Tue: OS");
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        assert!(!app.should_quit);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
