//! Login screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::tui::app::App;
use crate::tui::types::LoginField;
use super::helpers::error_banner;

/// Renders the screen
pub fn render_login(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.login_screen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(4)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(3),  // idInstance
                Constraint::Length(3),  // apiTokenInstance
                Constraint::Length(3),  // Error
                Constraint::Min(0),
                Constraint::Length(3),  // Help
            ])
            .split(size);

        let title = Paragraph::new("Sign in to GREEN-API")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let fields = [
            (LoginField::IdInstance, screen.id_instance.clone(), chunks[1]),
            (LoginField::ApiToken, "*".repeat(screen.api_token.chars().count()), chunks[2]),
        ];
        for (field, value, area) in fields {
            let border_style = if screen.focused == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let input = Paragraph::new(value)
                .style(Style::default().fg(Color::White))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border_style)
                        .title(field.label()),
                );
            f.render_widget(input, area);
        }

        if let Some(error) = &screen.error {
            f.render_widget(error_banner(error), chunks[3]);
        }

        let help = Paragraph::new("Tab: Switch field | Ctrl+V: Paste | Enter: Sign in | Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[5]);
    }
}
