// Scripted in-memory gateway for tests

use crate::protocol::{ExtendedText, HistoryEntry, MessageDetail, Notification, NotificationBody};
use crate::transport::Gateway;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Gateway double: responses are scripted up front, calls are counted
#[derive(Default)]
pub struct MockGateway {
    pub reject_auth: bool,
    pub fail_send: bool,
    pub fail_history: Mutex<bool>,
    pub fail_poll: Mutex<bool>,
    pub next_id: Mutex<Option<String>>,
    pub notifications: Mutex<VecDeque<Notification>>,
    pub messages: Mutex<HashMap<String, MessageDetail>>,
    pub history: Mutex<HashMap<String, Vec<HistoryEntry>>>,
    pub history_delay: Option<Duration>,
    pub poll_delay: Option<Duration>,
    pub acknowledged: Mutex<Vec<u64>>,
    pub sent: Mutex<Vec<(String, String)>>,
    pub auth_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub poll_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_next_id(self, id: &str) -> Self {
        *self.next_id.lock().unwrap() = Some(id.to_string());
        self
    }

    pub fn with_history(self, counterpart_id: &str, entries: Vec<HistoryEntry>) -> Self {
        self.history
            .lock()
            .unwrap()
            .insert(counterpart_id.to_string(), entries);
        self
    }

    /// Queue a notification and the message it points at
    pub fn push_message(&self, receipt_id: u64, detail: MessageDetail) {
        let id = detail.id_message.clone();
        if let Some(id) = &id {
            self.messages.lock().unwrap().insert(id.clone(), detail);
        }
        self.notifications.lock().unwrap().push_back(Notification {
            receipt_id,
            body: NotificationBody {
                type_webhook: Some("incomingMessageReceived".to_string()),
                id_message: id,
            },
        });
    }

    /// Queue a notification that carries no message
    pub fn push_state_notification(&self, receipt_id: u64) {
        self.notifications.lock().unwrap().push_back(Notification {
            receipt_id,
            body: NotificationBody {
                type_webhook: Some("stateInstanceChanged".to_string()),
                id_message: None,
            },
        });
    }

    pub fn acknowledged(&self) -> Vec<u64> {
        self.acknowledged.lock().unwrap().clone()
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn gateway_error(message: &str, status: u16) -> Error {
    Error::Transport {
        message: message.to_string(),
        status: Some(status),
        payload: Some(serde_json::json!({ "message": message })),
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn check_auth(&self) -> Result<()> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_auth {
            return Err(gateway_error("Unauthorized", 401));
        }
        Ok(())
    }

    async fn send_message(&self, counterpart_id: &str, text: &str) -> Result<String> {
        let n = self.send_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_send {
            return Err(gateway_error("Send failed", 500));
        }
        self.sent
            .lock()
            .unwrap()
            .push((counterpart_id.to_string(), text.to_string()));
        let id = self
            .next_id
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| format!("SENT{}", n));
        Ok(id)
    }

    async fn poll_notification(&self) -> Result<Option<Notification>> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.poll_delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_poll.lock().unwrap() {
            return Err(gateway_error("Gateway unavailable", 503));
        }
        Ok(self.notifications.lock().unwrap().pop_front())
    }

    async fn fetch_message(&self, id_message: &str) -> Result<MessageDetail> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.messages
            .lock()
            .unwrap()
            .get(id_message)
            .cloned()
            .ok_or_else(|| gateway_error("Message not found", 404))
    }

    async fn fetch_history(&self, counterpart_id: &str, _count: u32) -> Result<Vec<HistoryEntry>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.history_delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_history.lock().unwrap() {
            return Err(gateway_error("History unavailable", 500));
        }
        Ok(self
            .history
            .lock()
            .unwrap()
            .get(counterpart_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn acknowledge_notification(&self, receipt_id: u64) -> Result<()> {
        self.acknowledged.lock().unwrap().push(receipt_id);
        Ok(())
    }
}

pub fn text_detail(id: &str, chat_id: &str, text: &str, timestamp: i64) -> MessageDetail {
    MessageDetail {
        kind: Some("incoming".to_string()),
        id_message: Some(id.to_string()),
        type_message: "textMessage".to_string(),
        text_message: Some(text.to_string()),
        extended_text_message: None,
        chat_id: chat_id.to_string(),
        timestamp,
    }
}

pub fn extended_detail(id: &str, chat_id: &str, text: &str, timestamp: i64) -> MessageDetail {
    MessageDetail {
        type_message: "extendedTextMessage".to_string(),
        text_message: None,
        extended_text_message: Some(ExtendedText {
            text: Some(text.to_string()),
        }),
        ..text_detail(id, chat_id, "", timestamp)
    }
}

pub fn history_entry(kind: &str, id: &str, text: &str, timestamp: i64) -> HistoryEntry {
    HistoryEntry {
        kind: kind.to_string(),
        id_message: id.to_string(),
        type_message: Some("textMessage".to_string()),
        text_message: Some(text.to_string()),
        extended_text_message: None,
        timestamp,
    }
}
