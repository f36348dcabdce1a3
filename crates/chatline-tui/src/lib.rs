//! chatline-tui: terminal chat page for chatline
//!
//! This crate provides the interactive surface for chatline:
//! - A page with a message form, an input and a conversation pane
//! - The event loop that dispatches submissions without blocking input
//! - Widgets for the transcript, input bar and status line

mod app;
mod event;
mod input;
mod page;
mod requests;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod ui;
mod widgets;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use input::TextInputState;
pub use page::ChatPage;
pub use theme::Theme;

use chatline_core::{ChatTransport, Config, HttpTransport};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::{info, warn};

use requests::Requests;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the chat page until the user quits.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let url = config.endpoint_url()?;
    let transport = HttpTransport::new(url, config.request_timeout())?;
    let mut app = App::new(config, transport.describe());
    if let Some(e) = &app.init_error {
        warn!(error = %e, "chat page is inert");
    }

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate_ms);
    info!(endpoint = %app.endpoint, "chat page started");

    let result = run_loop(&mut terminal, &mut app, &mut events, &transport).await;

    terminal.show_cursor()?;
    info!("chat page closed");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    transport: &HttpTransport,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut requests = Requests::new();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.sync_layout(area);
            ui::render(app, area, frame.buffer_mut());
        })?;

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                match event {
                    Event::Key(key) => {
                        let action = event::key_to_action(key);
                        if let Some(dispatch) = app.handle_action(action) {
                            requests.dispatch(dispatch, transport);
                        }
                    }
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollUp => app.scroll_wheel(true),
                        MouseEventKind::ScrollDown => app.scroll_wheel(false),
                        _ => {}
                    },
                    Event::Paste(text) => app.paste(&text),
                    // Redraw picks up the new size
                    Event::Tick | Event::Resize(_, _) => {}
                }
            }
            Some((dispatch, outcome)) = requests.next() => {
                app.resolve(dispatch, outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    requests.abort_all();
    Ok(())
}

/// Returns the TUI crate version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        assert!(!tui_version().is_empty());
    }
}
