//! New chat screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::protocol::PHONE_NUMBER_DIGITS;
use crate::tui::app::App;
use super::helpers::error_banner;

/// Renders the screen
pub fn render_new_chat(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.new_chat_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(3),  // Number input
                Constraint::Length(3),  // Error
                Constraint::Min(0),
                Constraint::Length(3),  // Help
            ])
            .split(size);

        let title = Paragraph::new("New Chat")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let input = Paragraph::new(screen.input.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        "Recipient number ({}/{} digits)",
                        screen.input.len(),
                        PHONE_NUMBER_DIGITS
                    )),
            );
        f.render_widget(input, chunks[1]);

        if let Some(error) = &screen.error {
            f.render_widget(error_banner(error), chunks[2]);
        }

        let help = Paragraph::new("Digits: Number | Enter: Open chat | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[4]);
    }
}
