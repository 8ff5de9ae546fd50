//! In-memory conversation store
//!
//! Holds one `Conversation` per counterpart in creation order. All timeline
//! mutation goes through the operations here.

use crate::storage::conversation::Conversation;
use crate::storage::message::{Direction, Message};
use tracing::debug;

/// Conversations keyed by counterpart phone number
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a conversation by counterpart
    pub fn get(&self, counterpart_id: &str) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.counterpart_id == counterpart_id)
    }

    /// Whether a conversation with the counterpart exists
    pub fn contains(&self, counterpart_id: &str) -> bool {
        self.get(counterpart_id).is_some()
    }

    /// All conversations in creation order
    pub fn list(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Number of conversations
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Whether the store has no conversations
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Get or create the conversation with a counterpart
    pub fn ensure(&mut self, counterpart_id: &str) -> &mut Conversation {
        let index = match self
            .conversations
            .iter()
            .position(|c| c.counterpart_id == counterpart_id)
        {
            Some(index) => index,
            None => {
                debug!("Creating conversation with {}", counterpart_id);
                self.conversations
                    .push(Conversation::new(counterpart_id.to_string()));
                self.conversations.len() - 1
            }
        };
        &mut self.conversations[index]
    }

    /// Append a message sent by this account
    ///
    /// Returns false if a message with the same id is already present.
    pub fn append_outgoing(&mut self, counterpart_id: &str, message: Message) -> bool {
        self.ensure(counterpart_id).append_message(message)
    }

    /// Append a message received from the counterpart (tagged incoming)
    pub fn append_incoming(&mut self, counterpart_id: &str, mut message: Message) -> bool {
        message.direction = Direction::Incoming;
        self.ensure(counterpart_id).append_message(message)
    }

    /// Prepend a one-time history backfill
    ///
    /// No-op when the conversation's history is already loaded; otherwise the
    /// conversation is created if absent and marked loaded. Returns the number
    /// of messages prepended.
    pub fn backfill_history(&mut self, counterpart_id: &str, older: Vec<Message>) -> usize {
        if self.get(counterpart_id).is_some_and(|c| c.history_loaded()) {
            return 0;
        }
        let added = self.ensure(counterpart_id).backfill(older);
        debug!("Backfilled {} messages for {}", added, counterpart_id);
        added
    }

    /// Claim the history load for a counterpart (creating it if absent)
    pub fn begin_history_load(&mut self, counterpart_id: &str) -> bool {
        self.ensure(counterpart_id).begin_history_load()
    }

    /// Release a claimed history load after a failure
    pub fn abort_history_load(&mut self, counterpart_id: &str) {
        if let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.counterpart_id == counterpart_id)
        {
            conversation.abort_history_load();
        }
    }
}
