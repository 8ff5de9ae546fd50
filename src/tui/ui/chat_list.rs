//! Chat list screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use crate::storage::HistoryState;
use crate::tui::app::App;
use super::helpers::{error_banner, format_timestamp};

/// Renders the screen

pub fn render_chat_list(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.chat_list_screen {
        let conversations = &app.snapshot.conversations;

        // Create layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(5),     // Chat list
                Constraint::Length(3),  // Status message or error
                Constraint::Length(3),  // Help text
            ])
            .split(size);

        // Title
        let instance = app
            .session
            .as_ref()
            .map(|s| s.credentials().id_instance.as_str())
            .unwrap_or("-");
        let title = Paragraph::new(format!(
            "Chats ({}) | instance {}",
            conversations.len(),
            instance
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        // Chat list
        if conversations.is_empty() {
            let empty_msg = Paragraph::new("No chats yet. Press 'n' to message a number!")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Chats"));
            f.render_widget(empty_msg, chunks[1]);
        } else {
            let chat_items: Vec<ListItem> = conversations
                .iter()
                .enumerate()
                .map(|(i, conversation)| {
                    let is_active = app.snapshot.active.as_deref()
                        == Some(conversation.counterpart_id.as_str());

                    let (style, indicator) = match conversation.history {
                        HistoryState::Loading => {
                            (Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD), "⌛ ")
                        }
                        _ if is_active => {
                            (Style::default().fg(Color::Green).add_modifier(Modifier::BOLD), "● ")
                        }
                        HistoryState::Loaded => (Style::default().fg(Color::White), "○ "),
                        HistoryState::Unloaded => (Style::default().fg(Color::DarkGray), "○ "),
                    };

                    let preview = conversation
                        .last_message()
                        .map(|m| format!(" | {} {}: {}", format_timestamp(m.timestamp), m.sender_label(), m.text))
                        .unwrap_or_default();

                    let marker = if i == screen.selected_index {
                        Span::styled("→ ", Style::default().fg(Color::Cyan))
                    } else {
                        Span::raw("  ")
                    };

                    ListItem::new(Line::from(vec![
                        marker,
                        Span::styled(indicator, style),
                        Span::styled(
                            format!(
                                "{} ({} msgs){}",
                                conversation.counterpart_id,
                                conversation.messages.len(),
                                preview
                            ),
                            style,
                        ),
                    ]))
                })
                .collect();

            let chat_list = List::new(chat_items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Chats (● Open | ⌛ Loading history | ○ Idle)")
                    .style(Style::default()),
            );
            f.render_widget(chat_list, chunks[1]);
        }

        // Error banner takes precedence over the status line
        if let Some(error) = &app.snapshot.error {
            f.render_widget(error_banner(error), chunks[2]);
        } else {
            let status_text = screen.status_message.as_deref().unwrap_or("");
            let status_widget = Paragraph::new(status_text)
                .style(Style::default().fg(Color::Green))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Status"));
            f.render_widget(status_widget, chunks[2]);
        }

        // Help text
        let help_text = "↑↓/j/k: Navigate | Enter: Open | n: New chat | r: Poll now | L: Logout | q: Quit";
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[3]);
    }
}
