//! Test utilities for chatline-tui rendering and event tests.

use crate::app::App;
use crate::event::Action;
use crate::ui;
use chatline_core::Config;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Endpoint label used by test apps.
pub const TEST_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with default configuration.
pub fn create_test_app() -> App {
    let mut app = App::new(&Config::default(), TEST_ENDPOINT);
    app.theme = crate::theme::Theme::mocha();
    app
}

/// Type text into the input one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        let action = if ch == '\n' {
            Action::Newline
        } else {
            Action::Insert(ch)
        };
        let _ = app.handle_action(action);
    }
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Draw the app on a test terminal and return the screen text.
pub fn render_app_to_string(app: &mut App) -> String {
    let mut terminal = create_test_terminal();
    terminal
        .draw(|frame| {
            let area = frame.area();
            app.sync_layout(area);
            ui::render(app, area, frame.buffer_mut());
        })
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }

    #[test]
    fn test_type_text() {
        let mut app = create_test_app();
        type_text(&mut app, "a\nb");
        assert_eq!(app.page.input.content(), "a\nb");
    }
}
