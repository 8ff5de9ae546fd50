//! Message structures and direction tracking

use serde::{Deserialize, Serialize};

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Sent by this account
    Outgoing,
    /// Received from the counterpart
    Incoming,
}

/// A message in a conversation timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Gateway-issued message id
    pub id: String,
    /// Message body
    pub text: String,
    /// Outgoing or incoming
    pub direction: Direction,
    /// Epoch seconds
    pub timestamp: i64,
}

impl Message {
    /// Create a new message
    pub fn new(id: String, text: String, direction: Direction, timestamp: i64) -> Self {
        Self {
            id,
            text,
            direction,
            timestamp,
        }
    }

    /// Create an outgoing message
    pub fn outgoing(id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self::new(id.into(), text.into(), Direction::Outgoing, timestamp)
    }

    /// Create an incoming message
    pub fn incoming(id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self::new(id.into(), text.into(), Direction::Incoming, timestamp)
    }

    /// Whether this account sent the message
    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Outgoing
    }

    /// Short sender label for the transcript
    pub fn sender_label(&self) -> &str {
        match self.direction {
            Direction::Outgoing => "You",
            Direction::Incoming => "Them",
        }
    }
}
