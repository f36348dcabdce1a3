//! Color palette for the chat page.

use chatline_core::Sender;
use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Senders
    pub user: Color,
    pub bot: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Theme {
    /// Pick a theme from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::high_contrast()
        } else {
            Self::mocha()
        }
    }

    /// Catppuccin Mocha (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244), // #cdd6f4
            muted: Color::Rgb(108, 112, 134), // #6c7086

            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            user: Color::Rgb(250, 179, 135), // #fab387 (peach)
            bot: Color::Rgb(137, 180, 250),  // #89b4fa (blue)

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe
        }
    }

    /// High contrast theme, used when `NO_COLOR` is set.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),

            text: Color::White,
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            secondary: Color::Magenta,

            user: Color::Yellow,
            bot: Color::Cyan,

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Style of an entry's label line.
    pub fn label_style(&self, sender: Sender) -> Style {
        match sender {
            Sender::User => Style::default().fg(self.user).add_modifier(Modifier::BOLD),
            Sender::Bot => Style::default().fg(self.bot).add_modifier(Modifier::BOLD),
            Sender::BotLoading => Style::default().fg(self.muted),
        }
    }

    /// Style of an entry's content lines.
    pub fn content_style(&self, sender: Sender) -> Style {
        match sender {
            Sender::User | Sender::Bot => Style::default().fg(self.text),
            Sender::BotLoading => Style::default()
                .fg(self.muted)
                .add_modifier(Modifier::ITALIC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocha_theme_creates() {
        let theme = Theme::mocha();
        assert!(matches!(theme.base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_high_contrast_theme_creates() {
        let theme = Theme::high_contrast();
        assert!(matches!(theme.base, Color::Black));
    }

    #[test]
    fn test_loading_content_is_muted() {
        let theme = Theme::mocha();
        assert_eq!(theme.content_style(Sender::BotLoading).fg, Some(theme.muted));
        assert_eq!(theme.content_style(Sender::Bot).fg, Some(theme.text));
    }
}
