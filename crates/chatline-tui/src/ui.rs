//! Page layout and rendering.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use crate::app::App;
use crate::widgets::{FooterHints, InputBar, StatusBar, TranscriptView};

/// Regions of the chat page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub status: Rect,
    pub transcript: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Split the page: status bar, conversation, input bar, key hints.
pub fn layout(area: Rect, input_height: u16) -> ChatLayout {
    let [status, transcript, input, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(area);

    ChatLayout {
        status,
        transcript,
        input,
        footer,
    }
}

/// Render the whole page. The input cursor is hidden while no widget is bound.
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let regions = layout(area, InputBar::height_for(&app.page.input));

    StatusBar::new(&app.endpoint, app.in_flight, &app.theme).render(regions.status, buf);
    TranscriptView::new(&app.page.transcript, &app.theme).render(regions.transcript, buf);
    InputBar::new(&app.page.input, &app.theme)
        .focused(app.is_bound())
        .render(regions.input, buf);
    FooterHints::new(&app.theme).render(regions.footer, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_to_string, type_text};
    use chatline_core::ChatReply;

    #[test]
    fn test_layout_regions() {
        let regions = layout(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(regions.status.height, 1);
        assert_eq!(regions.input.height, 3);
        assert_eq!(regions.footer.height, 1);
        assert_eq!(regions.transcript.height, 19);
        assert_eq!(regions.footer.y, 23);
    }

    #[test]
    fn test_page_shows_loading_then_reply() {
        let mut app = create_test_app();
        type_text(&mut app, "Hi");
        let dispatch = app.handle_action(Action::Submit).unwrap();

        let screen = render_app_to_string(&mut app);
        assert!(screen.contains("You"));
        assert!(screen.contains("  Hi"));
        assert!(screen.lines().any(|l| l.trim_matches('│').trim() == "..."));
        assert!(screen.contains("1 waiting"));

        app.resolve(dispatch, Ok(ChatReply::response("Hello!\nHow can I help?")));
        let screen = render_app_to_string(&mut app);
        assert!(screen.contains("Hello!"));
        assert!(screen.contains("How can I help?"));
        assert!(!screen.lines().any(|l| l.trim_matches('│').trim() == "..."));
        assert!(screen.contains("idle"));
    }
}
