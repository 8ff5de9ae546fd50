//! UI rendering module - screen-specific rendering functions
//!
//! This module contains the UI rendering logic organized by screen type.
//! Each screen has its own file for better maintainability.

mod chat_list;
mod chat_view;
mod helpers;
mod login;
mod new_chat;

use ratatui::Frame;
use crate::tui::types::Screen;
use crate::tui::app::App;

// Re-export render functions
pub use chat_list::render_chat_list;
pub use chat_view::render_chat_view;
pub use login::render_login;
pub use new_chat::render_new_chat;

// Re-export helper functions
pub use helpers::{format_timestamp, history_label};

/// Main UI rendering function - dispatches to screen-specific render functions
pub fn ui(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Login => render_login(f, app),
        Screen::ChatList => render_chat_list(f, app),
        Screen::NewChat => render_new_chat(f, app),
        Screen::ChatView => render_chat_view(f, app),
    }
}
