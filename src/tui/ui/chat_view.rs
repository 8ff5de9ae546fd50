//! Chat view screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::storage::Message;
use crate::tui::app::App;
use super::helpers::{error_banner, format_timestamp, history_label};

/// Renders the screen

pub fn render_chat_view(f: &mut Frame, app: &App) {
    let size = f.size();

    if let Some(screen) = &app.chat_view_screen {
        // A draft chat has no conversation until the first send
        let conversation = app.snapshot.conversation(&screen.counterpart_id);
        let messages: &[Message] = conversation.map(|c| c.messages.as_slice()).unwrap_or(&[]);

        // Create layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(5),     // Message history
                Constraint::Length(3),  // Input box
                Constraint::Length(3),  // Status/Help
            ])
            .split(size);

        // Title
        let state = conversation
            .map(|c| history_label(c.history))
            .unwrap_or("new chat");
        let title = Paragraph::new(format!("Chat with {} ({})", screen.counterpart_id, state))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        // Message history
        if messages.is_empty() {
            let empty_msg = Paragraph::new("No messages yet. Type a message below and press Enter to send.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Messages"));
            f.render_widget(empty_msg, chunks[1]);
        } else {
            // Window anchored at the newest message, shifted back by scroll offset
            let total_messages = messages.len();
            let visible_height = chunks[1].height.saturating_sub(2) as usize; // Subtract borders
            let end_idx = total_messages.saturating_sub(screen.scroll_offset).max(1);
            let start_idx = end_idx.saturating_sub(visible_height);

            let message_lines: Vec<Line> = messages[start_idx..end_idx]
                .iter()
                .map(|msg| {
                    let sender_color = if msg.is_outgoing() { Color::Green } else { Color::Blue };

                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", format_timestamp(msg.timestamp)),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            format!("{}: ", msg.sender_label()),
                            Style::default().fg(sender_color).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(msg.text.as_str(), Style::default().fg(Color::White)),
                    ])
                })
                .collect();

            let messages_widget = Paragraph::new(message_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Messages ({}/{})", end_idx, total_messages)),
                );
            f.render_widget(messages_widget, chunks[1]);
        }

        // Input box
        let input_widget = Paragraph::new(screen.input.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Type your message"),
            );
        f.render_widget(input_widget, chunks[2]);

        // Error, then status, then help
        if let Some(error) = &app.snapshot.error {
            f.render_widget(error_banner(error), chunks[3]);
        } else {
            let help_text = screen
                .status_message
                .clone()
                .unwrap_or_else(|| "Enter: Send | ↑↓: Scroll | Esc: Back to Chat List".to_string());
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(help, chunks[3]);
        }
    }
}
