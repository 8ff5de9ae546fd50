//! Local storage module
//!
//! This module handles client state including:
//! - The in-memory conversation store
//! - Messages and per-conversation history state
//! - Persisted instance credentials
//! - Configuration
//!
//! The module is organized into submodules:
//! - `message` - Message structure and direction
//! - `conversation` - Conversation timeline and history state
//! - `store` - Conversation store keyed by counterpart
//! - `credentials` - Instance credentials and their JSON file
//! - `settings` - Application settings and configuration

pub mod conversation;
pub mod credentials;
pub mod message;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use conversation::{Conversation, HistoryState};
pub use credentials::{CredentialStore, Credentials};
pub use message::{Direction, Message};
pub use settings::Settings;
pub use store::ConversationStore;
