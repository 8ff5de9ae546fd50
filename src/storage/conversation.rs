//! Conversation timeline management

use crate::storage::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One-time history backfill state of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryState {
    /// History has not been requested
    #[default]
    Unloaded,
    /// A history fetch is in flight
    Loading,
    /// History has been merged; permanent for the session
    Loaded,
}

/// A one-to-one conversation with a counterpart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Counterpart phone number
    pub counterpart_id: String,
    /// Messages in arrival/send order
    pub messages: Vec<Message>,
    /// Backfill state
    pub history: HistoryState,
}

impl Conversation {
    /// Create an empty conversation with a counterpart
    pub fn new(counterpart_id: String) -> Self {
        Self {
            counterpart_id,
            messages: Vec::new(),
            history: HistoryState::Unloaded,
        }
    }

    /// Whether history backfill has completed
    pub fn history_loaded(&self) -> bool {
        self.history == HistoryState::Loaded
    }

    /// Whether a message with this id is already in the timeline
    pub fn contains(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Append a message unless its id is already present
    ///
    /// Returns true if the message was appended.
    pub fn append_message(&mut self, msg: Message) -> bool {
        if self.contains(&msg.id) {
            return false;
        }
        self.messages.push(msg);
        true
    }

    /// Move Unloaded -> Loading; false if a load is running or done
    pub fn begin_history_load(&mut self) -> bool {
        if self.history != HistoryState::Unloaded {
            return false;
        }
        self.history = HistoryState::Loading;
        true
    }

    /// Move Loading back to Unloaded after a failed fetch
    pub fn abort_history_load(&mut self) {
        if self.history == HistoryState::Loading {
            self.history = HistoryState::Unloaded;
        }
    }

    /// Prepend older messages (oldest first) and mark history loaded
    ///
    /// No-op once loaded. Ids already in the timeline, or repeated within
    /// `older`, are skipped. Returns the number of messages prepended.
    pub fn backfill(&mut self, older: Vec<Message>) -> usize {
        if self.history_loaded() {
            return 0;
        }

        let mut seen: HashSet<String> = self.messages.iter().map(|m| m.id.clone()).collect();
        let mut merged: Vec<Message> = older
            .into_iter()
            .filter(|m| seen.insert(m.id.clone()))
            .collect();
        let added = merged.len();

        merged.append(&mut self.messages);
        self.messages = merged;
        self.history = HistoryState::Loaded;
        added
    }

    /// Most recent message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
