//! Protocol module
//!
//! This module defines the GREEN-API wire format used by Greenchat:
//! - Request and response bodies for the REST endpoints
//! - Chat identifier mapping (phone number <-> `@c.us` chat id)
//! - Message type constants and text extraction
//! - Recipient number validation

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Suffix denoting an individual (non-group) chat
pub const CHAT_SUFFIX: &str = "@c.us";

/// `typeMessage` of a plain text message
pub const TEXT_MESSAGE: &str = "textMessage";

/// `typeMessage` of a text message with link preview, quote, etc.
pub const EXTENDED_TEXT_MESSAGE: &str = "extendedTextMessage";

/// `type` marker for messages sent by this account
pub const OUTGOING_TYPE: &str = "outgoing";

/// Number of digits in a valid recipient number
pub const PHONE_NUMBER_DIGITS: usize = 11;

/// Build the gateway chat id for a counterpart phone number
///
/// Identifiers that already carry a suffix (e.g. group chats) pass through.
pub fn chat_id_for(counterpart_id: &str) -> String {
    if counterpart_id.contains('@') {
        counterpart_id.to_string()
    } else {
        format!("{}{}", counterpart_id, CHAT_SUFFIX)
    }
}

/// Strip the individual-chat suffix from a gateway chat id
pub fn counterpart_from_chat_id(chat_id: &str) -> &str {
    chat_id.strip_suffix(CHAT_SUFFIX).unwrap_or(chat_id)
}

/// Validate a recipient phone number (exactly 11 digits)
pub fn validate_phone_number(number: &str) -> Result<()> {
    if number.is_empty() {
        return Err(Error::Validation("Recipient number is required".to_string()));
    }
    if number.len() != PHONE_NUMBER_DIGITS || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(format!(
            "Number must consist of {} digits",
            PHONE_NUMBER_DIGITS
        )));
    }
    Ok(())
}

/// Body of `SendMessage`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Target chat id (`<phone>@c.us`)
    pub chat_id: String,
    /// Message text
    pub message: String,
}

/// Response of `SendMessage`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    /// Id assigned to the sent message
    pub id_message: String,
}

/// Body of `getChatHistory`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryRequest {
    /// Chat id to fetch history for
    pub chat_id: String,
    /// Maximum number of messages
    pub count: u32,
}

/// A queued gateway notification from `receiveNotification`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Receipt used to delete the notification from the queue
    pub receipt_id: u64,
    /// Webhook body
    pub body: NotificationBody,
}

/// Webhook body of a notification (only the fields Greenchat reads)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    /// Webhook kind, e.g. `incomingMessageReceived`
    #[serde(default)]
    pub type_webhook: Option<String>,
    /// Message id for message-carrying webhooks
    #[serde(default)]
    pub id_message: Option<String>,
}

/// `extendedTextMessage` payload
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExtendedText {
    /// Message text
    #[serde(default)]
    pub text: Option<String>,
}

/// Full message returned by `getMessage`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    /// `incoming` or `outgoing`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Message id
    #[serde(default)]
    pub id_message: Option<String>,
    /// Message type, e.g. `textMessage`
    pub type_message: String,
    /// Text of a plain text message
    #[serde(default)]
    pub text_message: Option<String>,
    /// Extended text payload
    #[serde(default)]
    pub extended_text_message: Option<ExtendedText>,
    /// Chat id of the conversation
    pub chat_id: String,
    /// Epoch seconds
    pub timestamp: i64,
}

impl MessageDetail {
    /// Whether this is a plain or extended text message
    pub fn is_text(&self) -> bool {
        is_text_type(&self.type_message)
    }

    /// Message text, if any
    pub fn text(&self) -> Option<&str> {
        extract_text(self.text_message.as_deref(), self.extended_text_message.as_ref())
    }

    /// Counterpart phone number of the chat
    pub fn counterpart_id(&self) -> &str {
        counterpart_from_chat_id(&self.chat_id)
    }

    /// Whether the gateway marks the message as sent by this account
    pub fn is_outgoing(&self) -> bool {
        self.kind.as_deref() == Some(OUTGOING_TYPE)
    }
}

/// One entry of `getChatHistory`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// `incoming` or `outgoing`
    #[serde(rename = "type")]
    pub kind: String,
    /// Message id
    pub id_message: String,
    /// Message type
    #[serde(default)]
    pub type_message: Option<String>,
    /// Text of a plain text message
    #[serde(default)]
    pub text_message: Option<String>,
    /// Extended text payload
    #[serde(default)]
    pub extended_text_message: Option<ExtendedText>,
    /// Epoch seconds
    #[serde(default)]
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Whether the message was sent by this account
    pub fn is_outgoing(&self) -> bool {
        self.kind == OUTGOING_TYPE
    }

    /// Text to display; non-text messages get a `[typeMessage]` placeholder
    pub fn display_text(&self) -> String {
        match extract_text(self.text_message.as_deref(), self.extended_text_message.as_ref()) {
            Some(text) => text.to_string(),
            None => format!("[{}]", self.type_message.as_deref().unwrap_or("unknown")),
        }
    }
}

fn is_text_type(type_message: &str) -> bool {
    type_message == TEXT_MESSAGE || type_message == EXTENDED_TEXT_MESSAGE
}

fn extract_text<'a>(plain: Option<&'a str>, extended: Option<&'a ExtendedText>) -> Option<&'a str> {
    plain
        .filter(|t| !t.is_empty())
        .or_else(|| extended.and_then(|e| e.text.as_deref()))
        .filter(|t| !t.is_empty())
}
