//! Message container widget.
//!
//! Each entry renders as a label line followed by its content. Content markup
//! is split into visual lines at every `<br>`, character references are
//! decoded, and each line is wrapped to the pane width.

use chatline_core::markup::{markup_lines, unescape};
use chatline_core::{Entry, MessageSink, Sender, Transcript};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::text::wrap_text;
use crate::theme::Theme;

/// Indentation of content lines under the label.
const CONTENT_INDENT: &str = "  ";

/// Shown while the container is empty.
const EMPTY_HINT: &str = "Ask me anything to start the conversation.";

/// Label line text for an entry.
pub fn entry_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Bot | Sender::BotLoading => "Bot",
    }
}

/// Lay out one entry at the given width.
pub fn entry_lines(entry: &Entry, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(CONTENT_INDENT.len()).max(1);
    let content_style = theme.content_style(entry.sender);

    let mut lines = vec![Line::from(Span::styled(
        entry_label(entry.sender),
        theme.label_style(entry.sender),
    ))];

    for segment in markup_lines(&entry.content) {
        for wrapped in wrap_text(&unescape(segment), content_width) {
            lines.push(Line::from(vec![
                Span::raw(CONTENT_INDENT),
                Span::styled(wrapped, content_style),
            ]));
        }
    }

    lines
}

/// Lay out the whole transcript, with a blank line between entries.
pub fn transcript_lines(transcript: &Transcript, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, entry) in transcript.entries().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.extend(entry_lines(entry, width, theme));
    }
    lines
}

/// The bordered conversation pane.
pub struct TranscriptView<'a> {
    transcript: &'a Transcript,
    theme: &'a Theme,
}

impl<'a> TranscriptView<'a> {
    pub fn new(transcript: &'a Transcript, theme: &'a Theme) -> Self {
        Self { transcript, theme }
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base))
    }

    /// Area available to lines once borders are drawn.
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.transcript.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                EMPTY_HINT,
                Style::default().fg(self.theme.muted),
            )))
            .render(inner, buf);
            return;
        }

        let lines = transcript_lines(self.transcript, inner.width as usize, self.theme);
        let max_offset = lines.len().saturating_sub(inner.height as usize);
        let offset = max_offset.saturating_sub(self.transcript.scroll_back());

        Paragraph::new(lines)
            .scroll((offset.min(u16::MAX as usize) as u16, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use insta::assert_snapshot;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_breaks_become_lines() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "Hi".into());
        transcript.append(Sender::Bot, "Line one<br>Line two".into());

        let lines = transcript_lines(&transcript, 40, &Theme::mocha());
        assert_eq!(
            plain(&lines),
            vec!["You", "  Hi", "", "Bot", "  Line one", "  Line two"]
        );
    }

    #[test]
    fn test_timetable_reply_layout() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "timetable for CSE".into());
        transcript.append(Sender::Bot, "Mon: DBMS<br>Tue: OS<br>Wed: CN".into());

        let lines = transcript_lines(&transcript, 40, &Theme::mocha());
        assert_snapshot!(plain(&lines).join("\n"), @r"
        You
          timetable for CSE

        Bot
          Mon: DBMS
          Tue: OS
          Wed: CN
        ");
    }

    #[test]
    fn test_character_references_decoded() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "&lt;b&gt; &amp; co".into());

        let lines = transcript_lines(&transcript, 40, &Theme::mocha());
        assert_eq!(plain(&lines)[1], "  <b> & co");
    }

    #[test]
    fn test_long_lines_wrap() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::Bot, "alpha beta gamma delta".into());

        let lines = transcript_lines(&transcript, 14, &Theme::mocha());
        assert_eq!(plain(&lines), vec!["Bot", "  alpha beta", "  gamma delta"]);
    }

    #[test]
    fn test_empty_pane_shows_hint() {
        let transcript = Transcript::new();
        let theme = Theme::mocha();
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);

        TranscriptView::new(&transcript, &theme).render(area, &mut buf);

        let screen = buffer_to_string(&buf);
        assert!(screen.contains("Conversation"));
        assert!(screen.contains(EMPTY_HINT));
    }

    #[test]
    fn test_shows_newest_lines_when_at_end() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.append(Sender::Bot, format!("message {i}"));
        }
        let theme = Theme::mocha();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);

        TranscriptView::new(&transcript, &theme).render(area, &mut buf);

        let screen = buffer_to_string(&buf);
        assert!(screen.contains("message 9"));
        assert!(!screen.contains("message 0"));
    }
}
