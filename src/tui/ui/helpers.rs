//! UI helper functions

use crate::storage::HistoryState;
use chrono::{DateTime, Local};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Format an epoch-seconds timestamp as local `HH:MM`, with the date when not today
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => {
            let local = utc.with_timezone(&Local);
            if local.date_naive() == Local::now().date_naive() {
                local.format("%H:%M").to_string()
            } else {
                local.format("%d.%m.%Y %H:%M").to_string()
            }
        }
        None => "--:--".to_string(),
    }
}

/// Short label for a conversation's history state
pub fn history_label(state: HistoryState) -> &'static str {
    match state {
        HistoryState::Unloaded => "history not loaded",
        HistoryState::Loading => "loading history...",
        HistoryState::Loaded => "history loaded",
    }
}

/// Red bordered paragraph for the page error banner
pub fn error_banner(message: &str) -> Paragraph<'_> {
    Paragraph::new(message)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"))
}
