//! Core types for TUI screens and navigation

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Instance credential entry
    Login,
    /// List of all conversations
    ChatList,
    /// Recipient entry for a new conversation
    NewChat,
    /// Individual conversation view
    ChatView,
}

/// Field focused on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Instance id input
    IdInstance,
    /// API token input
    ApiToken,
}

impl LoginField {
    /// The other field (Tab cycles between the two)
    pub fn toggle(self) -> Self {
        match self {
            Self::IdInstance => Self::ApiToken,
            Self::ApiToken => Self::IdInstance,
        }
    }

    /// Placeholder label for the field
    pub fn label(&self) -> &str {
        match self {
            Self::IdInstance => "idInstance",
            Self::ApiToken => "apiTokenInstance",
        }
    }
}
