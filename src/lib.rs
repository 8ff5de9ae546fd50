//! Greenchat - a terminal WhatsApp client over the GREEN-API gateway
//!
//! This library provides the core functionality for Greenchat: the gateway
//! client, the in-memory conversation store, the notification poller and the
//! chat controller that keeps them in sync. The `tui` module renders it all
//! in a terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod messaging;
pub mod poller;
pub mod protocol;
pub mod session;
pub mod storage;
pub mod transport;
pub mod tui;

#[cfg(test)]
mod tests;

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Result type alias for Greenchat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Greenchat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or HTTP failure talking to the gateway
    #[error("{message}")]
    Transport {
        /// Human-readable message (gateway-provided when available)
        message: String,
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Raw response payload, when one was received
        payload: Option<serde_json::Value>,
    },

    /// Malformed user input
    #[error("{0}")]
    Validation(String),

    /// Unexpected or missing fields in a gateway response
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Storage operation error
    #[error("Storage error: {0}")]
    Storage(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a transport error that carries only a message
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    /// HTTP status code attached to a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw gateway payload attached to a transport error
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Transport { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the API token
        let err = err.without_url();
        Self::Transport {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
            payload: None,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("greenchat=info"))
}

/// Initialize the Greenchat library with logging to stdout
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Initialize logging into a file (the TUI owns the terminal)
pub fn init_with_log_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init()
        .map_err(|e| Error::Storage(format!("Failed to install log subscriber: {}", e)))?;

    Ok(())
}
