//! Message form: the input bar at the bottom of the page.
//!
//! Supports multi-line input with Ctrl+J for newlines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::input::TextInputState;
use crate::theme::Theme;

/// Placeholder shown in an empty input.
const PLACEHOLDER: &str = "Type your message...";

/// Smallest and largest bar height, borders included.
pub const MIN_HEIGHT: u16 = 3;
pub const MAX_HEIGHT: u16 = 8;

/// Full-width input bar.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            focused: true,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Height needed to show every input line, within the bar's limits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn height_for(input: &TextInputState) -> u16 {
        let lines = input.content().split('\n').count().min(usize::from(MAX_HEIGHT));
        (lines as u16 + 2).clamp(MIN_HEIGHT, MAX_HEIGHT)
    }

    /// Build display lines and the index of the line holding the cursor.
    fn build_lines(&self) -> (Vec<Line<'static>>, usize) {
        if self.input.is_empty() {
            let mut spans = vec![Span::styled("> ", Style::default().fg(self.theme.primary))];
            if self.focused {
                spans.push(Span::styled("█", Style::default().fg(self.theme.text)));
            }
            spans.push(Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted)));
            return (vec![Line::from(spans)], 0);
        }

        let (text_lines, cursor_line, cursor_col) = self.input.lines_with_cursor();
        let text_style = Style::default().fg(self.theme.text);
        let mut lines = Vec::with_capacity(text_lines.len());

        for (idx, text) in text_lines.iter().enumerate() {
            let prefix = if idx == 0 { "> " } else { "  " };
            let mut spans = vec![Span::styled(prefix, Style::default().fg(self.theme.primary))];

            if self.focused && idx == cursor_line {
                let before: String = text.chars().take(cursor_col).collect();
                let after: String = text.chars().skip(cursor_col).collect();
                spans.push(Span::styled(before, text_style));
                spans.push(Span::styled("█", text_style));
                spans.push(Span::styled(after, text_style));
            } else {
                spans.push(Span::styled((*text).to_string(), text_style));
            }
            lines.push(Line::from(spans));
        }

        (lines, cursor_line)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_height = area.height.saturating_sub(2) as usize;
        let (lines, cursor_line) = self.build_lines();

        // Keep the cursor line visible
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(input: &TextInputState) -> String {
        let theme = Theme::mocha();
        let area = Rect::new(0, 0, 40, InputBar::height_for(input));
        let mut buf = Buffer::empty(area);
        InputBar::new(input, &theme).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_input_shows_placeholder() {
        let screen = render(&TextInputState::new());
        assert!(screen.contains("Message"));
        assert!(screen.contains(PLACEHOLDER));
    }

    #[test]
    fn test_cursor_drawn_inside_text() {
        let mut input = TextInputState::new();
        input.insert_str("Hello");
        input.move_left();
        let screen = render(&input);
        assert!(screen.contains("> Hell█o"));
    }

    #[test]
    fn test_height_grows_with_lines() {
        let mut input = TextInputState::new();
        assert_eq!(InputBar::height_for(&input), MIN_HEIGHT);

        input.insert_str("a\nb\nc");
        assert_eq!(InputBar::height_for(&input), 5);

        input.insert_str("\n".repeat(20).as_str());
        assert_eq!(InputBar::height_for(&input), MAX_HEIGHT);
    }
}
