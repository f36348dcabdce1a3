//! Top status bar and bottom key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::text::{display_width, truncate_to_width};
use crate::theme::Theme;

/// Key hints shown in the footer.
const KEY_HINTS: [(&str, &str); 4] = [
    ("Enter", "send"),
    ("Ctrl+J", "newline"),
    ("PgUp/PgDn", "scroll"),
    ("Esc", "quit"),
];

/// Status text for the number of requests awaiting a reply.
pub fn in_flight_label(in_flight: usize) -> String {
    match in_flight {
        0 => "idle".into(),
        1 => "1 waiting".into(),
        n => format!("{n} waiting"),
    }
}

/// One-line status bar: app name, endpoint and in-flight requests.
pub struct StatusBar<'a> {
    endpoint: &'a str,
    in_flight: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(endpoint: &'a str, in_flight: usize, theme: &'a Theme) -> Self {
        Self {
            endpoint,
            in_flight,
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bar = Style::default().bg(self.theme.surface).fg(self.theme.text);
        let name = " chatline ";
        let state = format!(" {} ", in_flight_label(self.in_flight));

        let fixed = display_width(name) + display_width(&state) + 4;
        let endpoint = truncate_to_width(
            self.endpoint,
            usize::from(area.width).saturating_sub(fixed),
        );

        let state_style = if self.in_flight > 0 {
            bar.fg(self.theme.secondary)
        } else {
            bar.fg(self.theme.muted)
        };

        let line = Line::from(vec![
            Span::styled(name, bar.fg(self.theme.primary).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", bar.fg(self.theme.border)),
            Span::styled(endpoint, bar),
            Span::styled(" │", bar.fg(self.theme.border)),
            Span::styled(state, state_style),
        ]);

        Paragraph::new(line).style(bar).render(area, buf);
    }
}

/// Footer with key hints.
pub struct FooterHints<'a> {
    theme: &'a Theme,
}

impl<'a> FooterHints<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (key, label) in KEY_HINTS {
            spans.push(Span::styled(
                format!(" {key}"),
                Style::default().fg(self.theme.primary),
            ));
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(self.theme.muted),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_in_flight_label() {
        assert_eq!(in_flight_label(0), "idle");
        assert_eq!(in_flight_label(1), "1 waiting");
        assert_eq!(in_flight_label(3), "3 waiting");
    }

    #[test]
    fn test_status_bar_text() {
        let theme = Theme::mocha();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new("http://127.0.0.1:5000/chat", 2, &theme).render(area, &mut buf);
        assert_eq!(
            buffer_to_string(&buf),
            " chatline │ http://127.0.0.1:5000/chat │ 2 waiting"
        );
    }

    #[test]
    fn test_footer_lists_keys() {
        let theme = Theme::mocha();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&theme).render(area, &mut buf);
        let text = buffer_to_string(&buf);
        assert!(text.contains("Enter send"));
        assert!(text.contains("Esc quit"));
    }
}
