//! High-level messaging module
//!
//! `ChatController` combines the gateway and the conversation store: it
//! sends messages, selects conversations, backfills history once per
//! conversation and folds polled notifications into the timelines. Every
//! failure is both returned and recorded in the error banner shown by the UI.

use crate::poller::{InFlightGuard, PollOutcome};
use crate::protocol::{validate_phone_number, HistoryEntry, MessageDetail};
use crate::storage::{Conversation, ConversationStore, Message};
use crate::transport::Gateway;
use crate::{Error, Result};
use chrono::Utc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Mutable chat page state, owned by the controller
#[derive(Debug, Default)]
pub struct ChatState {
    /// All conversations of the session
    pub store: ConversationStore,
    /// Counterpart of the active conversation
    pub active: Option<String>,
    /// Most recent failure, cleared by the next success
    pub error: Option<String>,
}

/// Point-in-time copy of the chat state for rendering
#[derive(Debug, Clone, Default)]
pub struct ChatSnapshot {
    /// Conversations in creation order
    pub conversations: Vec<Conversation>,
    /// Counterpart of the active conversation
    pub active: Option<String>,
    /// Error banner text
    pub error: Option<String>,
}

impl ChatSnapshot {
    /// Find a conversation by counterpart
    pub fn conversation(&self, counterpart_id: &str) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.counterpart_id == counterpart_id)
    }

    /// The active conversation, if it exists
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active.as_deref().and_then(|id| self.conversation(id))
    }
}

/// Orchestrates gateway calls against the conversation store
#[derive(Clone)]
pub struct ChatController {
    gateway: Arc<dyn Gateway>,
    state: Arc<Mutex<ChatState>>,
    poll_in_flight: Arc<AtomicBool>,
    history_count: u32,
}

impl ChatController {
    /// Create a controller with an empty store
    ///
    /// # Arguments
    /// * `gateway` - Gateway used for every network call
    /// * `history_count` - Messages fetched per history backfill
    pub fn new(gateway: Arc<dyn Gateway>, history_count: u32) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(ChatState::default())),
            poll_in_flight: Arc::new(AtomicBool::new(false)),
            history_count,
        }
    }

    /// Send a text message to a counterpart
    ///
    /// On success the message is appended with the gateway id and the client
    /// clock, the conversation becomes active, and a conversation that did not
    /// exist before gets its history loaded. On failure nothing changes
    /// except the error banner.
    ///
    /// # Returns
    /// * `Ok(id)` - Gateway-issued message id
    /// * `Err(Error)` - Validation or transport failure
    ///
    /// # Example
    /// ```rust,no_run
    /// use greenchat::messaging::ChatController;
    /// use greenchat::storage::{Credentials, Settings};
    /// use greenchat::transport::HttpGateway;
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> greenchat::Result<()> {
    /// let settings = Settings::default();
    /// let credentials = Credentials::new("1101000001", "token");
    /// let gateway = HttpGateway::new(&settings, &credentials)?;
    /// let controller = ChatController::new(Arc::new(gateway), settings.history_count);
    ///
    /// let id = controller.send_message("79991234567", "hello").await?;
    /// println!("Sent {}", id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_message(&self, counterpart_id: &str, text: &str) -> Result<String> {
        let counterpart_id = counterpart_id.trim();
        let sent = self.deliver(counterpart_id, text).await;
        let id_message = self.surface(sent).await?;

        let is_new = {
            let mut state = self.state.lock().await;
            let is_new = !state.store.contains(counterpart_id);
            state.store.append_outgoing(
                counterpart_id,
                Message::outgoing(id_message.clone(), text, Utc::now().timestamp()),
            );
            state.active = Some(counterpart_id.to_string());
            state.error = None;
            is_new
        };

        if is_new {
            if let Err(e) = self.load_history(counterpart_id).await {
                debug!("History load after first send to {} failed: {}", counterpart_id, e);
            }
        }

        Ok(id_message)
    }

    async fn deliver(&self, counterpart_id: &str, text: &str) -> Result<String> {
        // Known conversations may carry non-phone ids (groups), only new ones are checked
        if !self.state.lock().await.store.contains(counterpart_id) {
            validate_phone_number(counterpart_id)?;
        }
        if text.trim().is_empty() {
            return Err(Error::Validation("Message is required".to_string()));
        }
        self.gateway.send_message(counterpart_id, text).await
    }

    /// Make a conversation active, loading its history on first selection
    ///
    /// A counterpart without a conversation gets an empty one before the
    /// history fetch resolves.
    pub async fn select_conversation(&self, counterpart_id: &str) -> Result<()> {
        let needs_history = {
            let mut state = self.state.lock().await;
            let needs_history = !state.store.ensure(counterpart_id).history_loaded();
            state.active = Some(counterpart_id.to_string());
            needs_history
        };

        if needs_history {
            self.load_history(counterpart_id).await?;
        }
        Ok(())
    }

    /// Backfill a conversation's history at most once
    ///
    /// # Returns
    /// * `Ok(true)` - History was fetched and merged
    /// * `Ok(false)` - A load is already running or done; nothing fetched
    /// * `Err(Error)` - Fetch failed; the conversation can be loaded again
    pub async fn load_history(&self, counterpart_id: &str) -> Result<bool> {
        if !self.state.lock().await.store.begin_history_load(counterpart_id) {
            debug!("History for {} already loading or loaded", counterpart_id);
            return Ok(false);
        }

        match self
            .gateway
            .fetch_history(counterpart_id, self.history_count)
            .await
        {
            Ok(entries) => {
                // Entries arrive newest first; reverse so same-second messages keep their order
                let mut older: Vec<Message> = entries.iter().rev().map(history_message).collect();
                older.sort_by_key(|m| m.timestamp);

                let mut state = self.state.lock().await;
                let added = state.store.backfill_history(counterpart_id, older);
                state.error = None;
                info!("Loaded {} history messages for {}", added, counterpart_id);
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to load history for {}: {}", counterpart_id, e);
                let mut state = self.state.lock().await;
                state.store.abort_history_load(counterpart_id);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Run one notification poll cycle
    ///
    /// Returns `PollOutcome::Skipped` without touching the gateway while
    /// another cycle is in flight.
    pub async fn poll_once(&self) -> Result<PollOutcome> {
        let Some(_guard) = InFlightGuard::acquire(&self.poll_in_flight) else {
            debug!("Poll cycle still running, skipping");
            return Ok(PollOutcome::Skipped);
        };

        let result = self.run_poll_cycle().await;
        if result.is_ok() {
            self.state.lock().await.error = None;
        }
        self.surface(result).await
    }

    async fn run_poll_cycle(&self) -> Result<PollOutcome> {
        let Some(notification) = self.gateway.poll_notification().await? else {
            return Ok(PollOutcome::Idle);
        };

        let outcome = match notification.body.id_message.as_deref() {
            Some(id_message) => {
                let detail = self.gateway.fetch_message(id_message).await?;
                self.fold_message(id_message, &detail).await
            }
            None => {
                debug!(
                    "Notification {} ({:?}) carries no message",
                    notification.receipt_id, notification.body.type_webhook
                );
                PollOutcome::Ignored
            }
        };

        self.gateway
            .acknowledge_notification(notification.receipt_id)
            .await?;
        Ok(outcome)
    }

    async fn fold_message(&self, id_message: &str, detail: &MessageDetail) -> PollOutcome {
        if !detail.is_text() {
            debug!("Ignoring {} message {}", detail.type_message, id_message);
            return PollOutcome::Ignored;
        }
        let Some(text) = detail.text() else {
            warn!("{}", Error::Protocol(format!("text message {} carries no text", id_message)));
            return PollOutcome::Ignored;
        };

        let counterpart_id = detail.counterpart_id().to_string();
        let id = detail
            .id_message
            .clone()
            .unwrap_or_else(|| id_message.to_string());

        let mut state = self.state.lock().await;
        let appended = if detail.is_outgoing() {
            state
                .store
                .append_outgoing(&counterpart_id, Message::outgoing(id, text, detail.timestamp))
        } else {
            state
                .store
                .append_incoming(&counterpart_id, Message::incoming(id, text, detail.timestamp))
        };

        if appended {
            info!("New message in conversation with {}", counterpart_id);
            PollOutcome::Appended { counterpart_id }
        } else {
            PollOutcome::Duplicate { counterpart_id }
        }
    }

    /// Record a failure in the error banner and pass the result through
    async fn surface<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!("Chat operation failed: {}", e);
            self.state.lock().await.error = Some(e.to_string());
        }
        result
    }

    /// Counterpart of the active conversation
    pub async fn active_conversation(&self) -> Option<String> {
        self.state.lock().await.active.clone()
    }

    /// Messages of the active conversation (empty when none is active)
    pub async fn active_transcript(&self) -> Vec<Message> {
        let state = self.state.lock().await;
        state
            .active
            .as_deref()
            .and_then(|id| state.store.get(id))
            .map(|c| c.messages.clone())
            .unwrap_or_default()
    }

    /// Copy of one conversation
    pub async fn conversation(&self, counterpart_id: &str) -> Option<Conversation> {
        self.state.lock().await.store.get(counterpart_id).cloned()
    }

    /// Copy of all conversations in creation order
    pub async fn conversations(&self) -> Vec<Conversation> {
        self.state.lock().await.store.list().to_vec()
    }

    /// Current error banner text
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// Dismiss the error banner
    pub async fn clear_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Copy of everything the chat screens render
    pub async fn snapshot(&self) -> ChatSnapshot {
        let state = self.state.lock().await;
        ChatSnapshot {
            conversations: state.store.list().to_vec(),
            active: state.active.clone(),
            error: state.error.clone(),
        }
    }
}

/// Map a history entry into the timeline shape
fn history_message(entry: &HistoryEntry) -> Message {
    let text = entry.display_text();
    if entry.is_outgoing() {
        Message::outgoing(entry.id_message.clone(), text, entry.timestamp)
    } else {
        Message::incoming(entry.id_message.clone(), text, entry.timestamp)
    }
}
