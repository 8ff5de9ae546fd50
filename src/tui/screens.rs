//! Screen state structures for TUI

use crate::protocol::validate_phone_number;
use crate::storage::Credentials;
use crate::tui::clipboard::ClipboardProvider;
use crate::tui::types::LoginField;

/// Login screen state
#[derive(Debug)]
pub struct LoginScreen {
    /// idInstance input
    pub id_instance: String,
    /// apiTokenInstance input
    pub api_token: String,
    /// Field receiving keystrokes
    pub focused: LoginField,
    /// Login or validation error
    pub error: Option<String>,
}

impl LoginScreen {
    /// Create new login screen
    pub fn new() -> Self {
        Self {
            id_instance: String::new(),
            api_token: String::new(),
            focused: LoginField::IdInstance,
            error: None,
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focused {
            LoginField::IdInstance => &mut self.id_instance,
            LoginField::ApiToken => &mut self.api_token,
        }
    }

    /// Add character to the focused field
    pub fn add_char(&mut self, c: char) {
        self.focused_input().push(c);
    }

    /// Remove last character from the focused field
    pub fn backspace(&mut self) {
        self.focused_input().pop();
    }

    /// Switch focus to the other field
    pub fn toggle_field(&mut self) {
        self.focused = self.focused.toggle();
    }

    /// Replace the focused field with clipboard text
    pub fn paste_from(&mut self, clipboard: &mut dyn ClipboardProvider) {
        match clipboard.paste_value() {
            Ok(value) => {
                *self.focused_input() = value;
                self.error = None;
            }
            Err(e) => self.error = Some(format!("Failed to paste: {}", e)),
        }
    }

    /// Credentials from the inputs, or a validation message
    pub fn credentials(&mut self) -> Option<Credentials> {
        let credentials = Credentials::new(&self.id_instance, &self.api_token);
        match credentials.validate() {
            Ok(()) => Some(credentials),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat List screen state
#[derive(Debug, Default)]
pub struct ChatListScreen {
    /// Currently selected conversation index
    pub selected_index: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl ChatListScreen {
    /// Create new chat list screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Move selection down (wraps)
    pub fn next(&mut self, chat_count: usize) {
        if chat_count > 0 {
            self.selected_index = (self.selected_index + 1) % chat_count;
        }
    }

    /// Move selection up (wraps)
    pub fn previous(&mut self, chat_count: usize) {
        if chat_count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = chat_count - 1;
            }
        }
    }

    /// Keep the selection inside the list after it changes size
    pub fn clamp(&mut self, chat_count: usize) {
        if self.selected_index >= chat_count {
            self.selected_index = chat_count.saturating_sub(1);
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// New chat screen state (recipient entry)
#[derive(Debug, Default)]
pub struct NewChatScreen {
    /// Recipient number input
    pub input: String,
    /// Validation error
    pub error: Option<String>,
}

impl NewChatScreen {
    /// Create new chat screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a digit to the number (other characters are ignored)
    pub fn add_char(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.input.push(c);
        }
    }

    /// Remove last digit
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Validated recipient number, or `None` with `error` set
    pub fn recipient(&mut self) -> Option<String> {
        match validate_phone_number(&self.input) {
            Ok(()) => {
                self.error = None;
                Some(self.input.clone())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

/// Chat View screen state
#[derive(Debug)]
pub struct ChatViewScreen {
    /// Counterpart phone number
    pub counterpart_id: String,
    /// Input buffer for message composition
    pub input: String,
    /// Messages scrolled back from the newest (0 = follow newest)
    pub scroll_offset: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl ChatViewScreen {
    /// Create new chat view screen
    pub fn new(counterpart_id: String) -> Self {
        Self {
            counterpart_id,
            input: String::new(),
            scroll_offset: 0,
            status_message: None,
        }
    }

    /// Add character to input
    pub fn add_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove last character from input
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Clear input buffer
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Scroll towards older messages
    pub fn scroll_up(&mut self, max_offset: usize) {
        if self.scroll_offset < max_offset {
            self.scroll_offset += 1;
        }
    }

    /// Scroll towards newer messages
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
