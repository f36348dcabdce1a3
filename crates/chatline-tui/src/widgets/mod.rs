//! Widgets of the chat page.
//!
//! This module provides:
//! - [`TranscriptView`] - The message container
//! - [`InputBar`] - The message form
//! - [`StatusBar`] and [`FooterHints`] - Top and bottom bars

mod input_bar;
mod status_bar;
mod transcript_view;

pub use input_bar::InputBar;
pub use status_bar::{FooterHints, StatusBar};
pub use transcript_view::{transcript_lines, TranscriptView};
