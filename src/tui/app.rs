//! Main TUI application state and logic

use crate::messaging::{ChatController, ChatSnapshot};
use crate::session::Session;
use crate::storage::{CredentialStore, Settings};
use crate::tui::clipboard::ClipboardProvider;
use crate::tui::screens::*;
use crate::tui::types::Screen;
use std::future::Future;
use std::path::Path;

/// Default settings file location
pub const DEFAULT_SETTINGS_PATH: &str = "./app_data/settings.json";

/// Application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Should quit
    pub should_quit: bool,
    /// Loaded settings
    pub settings: Settings,
    /// Chat state copied from the controller for rendering
    pub snapshot: ChatSnapshot,
    /// Logged-in session, if any
    pub session: Option<Session>,
    /// Login screen (when active)
    pub login_screen: Option<LoginScreen>,
    /// Chat list screen (when active)
    pub chat_list_screen: Option<ChatListScreen>,
    /// New chat screen (when active)
    pub new_chat_screen: Option<NewChatScreen>,
    /// Chat view screen (when active)
    pub chat_view_screen: Option<ChatViewScreen>,
    /// Persisted credentials
    credential_store: CredentialStore,
    /// Runtime driving gateway calls and the poll task (dropped last)
    runtime: tokio::runtime::Runtime,
}

impl App {
    /// Create new application from settings
    ///
    /// Saved credentials resume the session straight into the chat list;
    /// otherwise the login screen is shown.
    pub fn with_settings(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let runtime = tokio::runtime::Runtime::new()?;
        let credential_store = CredentialStore::new(&settings.credentials_path);
        let resumed = Session::resume(&settings, &credential_store)?;

        let mut app = Self {
            current_screen: Screen::Login,
            should_quit: false,
            settings,
            snapshot: ChatSnapshot::default(),
            session: None,
            login_screen: Some(LoginScreen::new()),
            chat_list_screen: None,
            new_chat_screen: None,
            chat_view_screen: None,
            credential_store,
            runtime,
        };

        if let Some(session) = resumed {
            app.attach_session(session);
        }

        Ok(app)
    }

    /// Create new application, loading settings from a file
    ///
    /// # Arguments
    /// * `settings_path` - Optional settings file. Production uses ./app_data/settings.json
    pub fn new_with_settings<P: AsRef<Path>>(settings_path: Option<P>) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = match settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::load(DEFAULT_SETTINGS_PATH)?,
        };
        Self::with_settings(settings)
    }

    /// Create new application with default settings location
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::new_with_settings(None::<&str>)
    }

    /// Run a future on the app runtime, blocking the UI until it completes
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Controller of the current session
    pub fn controller(&self) -> Option<&ChatController> {
        self.session.as_ref().map(|s| s.controller())
    }

    /// Install a session, start polling and show the chat list
    pub fn attach_session(&mut self, mut session: Session) {
        {
            let _guard = self.runtime.enter();
            session.start_polling();
        }
        self.session = Some(session);
        self.login_screen = None;
        self.show_chat_list_screen();
    }

    /// Submit the login form
    pub fn submit_login(&mut self) {
        let Some(credentials) = self.login_screen.as_mut().and_then(|s| s.credentials()) else {
            return;
        };

        let result = self.block_on(Session::login(
            &self.settings,
            &self.credential_store,
            credentials,
        ));

        match result {
            Ok(session) => self.attach_session(session),
            Err(e) => {
                if let Some(screen) = &mut self.login_screen {
                    screen.set_error(e.to_string());
                }
            }
        }
    }

    /// Paste clipboard text into the focused login field
    pub fn paste_into_login(&mut self, clipboard: &mut dyn ClipboardProvider) {
        if let Some(screen) = &mut self.login_screen {
            screen.paste_from(clipboard);
        }
    }

    /// Log out and return to the login screen
    pub fn logout(&mut self) {
        let mut login_screen = LoginScreen::new();
        if let Some(session) = self.session.take() {
            if let Err(e) = session.logout(&self.credential_store) {
                tracing::error!("Logout failed: {}", e);
                login_screen.set_error(format!("Logout failed: {}", e));
            }
        }

        self.snapshot = ChatSnapshot::default();
        self.chat_list_screen = None;
        self.new_chat_screen = None;
        self.chat_view_screen = None;
        self.login_screen = Some(login_screen);
        self.current_screen = Screen::Login;
    }

    /// Stop background work before exit
    pub fn shutdown(&mut self) {
        if let Some(session) = &mut self.session {
            session.stop_polling();
        }
    }

    /// Copy the controller state for the next frame
    pub fn refresh_snapshot(&mut self) {
        if let Some(controller) = self.controller() {
            let snapshot = self.block_on(controller.snapshot());
            self.snapshot = snapshot;
        }
        if let Some(screen) = &mut self.chat_list_screen {
            screen.clamp(self.snapshot.conversations.len());
        }
    }

    /// Show chat list screen
    pub fn show_chat_list_screen(&mut self) {
        self.refresh_snapshot();
        self.chat_list_screen = Some(ChatListScreen::new());
        self.current_screen = Screen::ChatList;
    }

    /// Show new chat screen
    pub fn show_new_chat_screen(&mut self) {
        self.new_chat_screen = Some(NewChatScreen::new());
        self.current_screen = Screen::NewChat;
    }

    /// Open a conversation view for the entered recipient
    ///
    /// The conversation itself is created by the first send.
    pub fn submit_new_chat(&mut self) {
        let Some(recipient) = self.new_chat_screen.as_mut().and_then(|s| s.recipient()) else {
            return;
        };

        self.new_chat_screen = None;
        self.chat_view_screen = Some(ChatViewScreen::new(recipient));
        self.current_screen = Screen::ChatView;
    }

    /// Open selected conversation, loading its history on first open
    pub fn open_selected_chat(&mut self) {
        let Some(selected_index) = self.chat_list_screen.as_ref().map(|s| s.selected_index) else {
            return;
        };
        let Some(counterpart_id) = self
            .snapshot
            .conversations
            .get(selected_index)
            .map(|c| c.counterpart_id.clone())
        else {
            return;
        };

        if let Some(controller) = self.controller() {
            // Failures land in the error banner
            let _ = self.block_on(controller.select_conversation(&counterpart_id));
        }

        self.chat_view_screen = Some(ChatViewScreen::new(counterpart_id));
        self.current_screen = Screen::ChatView;
        self.refresh_snapshot();
    }

    /// Return to chat list
    pub fn back_to_chat_list(&mut self) {
        let selected = self
            .chat_view_screen
            .take()
            .and_then(|view| {
                self.snapshot
                    .conversations
                    .iter()
                    .position(|c| c.counterpart_id == view.counterpart_id)
            })
            .unwrap_or(0);

        self.new_chat_screen = None;
        self.show_chat_list_screen();
        if let Some(screen) = &mut self.chat_list_screen {
            screen.selected_index = selected;
            screen.clamp(self.snapshot.conversations.len());
        }
    }

    /// Send message in current chat
    pub fn send_message_in_chat(&mut self) {
        let (text, counterpart_id) = match &self.chat_view_screen {
            Some(view) if !view.input.trim().is_empty() => {
                (view.input.clone(), view.counterpart_id.clone())
            }
            _ => return,
        };
        let Some(controller) = self.controller() else {
            return;
        };

        let result = self.block_on(controller.send_message(&counterpart_id, &text));

        if let Some(view) = &mut self.chat_view_screen {
            match result {
                Ok(_) => {
                    view.clear_input();
                    view.scroll_offset = 0;
                    view.set_status("Message sent".to_string());
                }
                Err(e) => view.set_status(format!("Error: {}", e)),
            }
        }
        self.refresh_snapshot();
    }

    /// Run a poll cycle immediately
    pub fn poll_now(&mut self) {
        let Some(controller) = self.controller() else {
            return;
        };
        let result = self.block_on(controller.poll_once());

        if let Some(screen) = &mut self.chat_list_screen {
            match result {
                Ok(outcome) => screen.set_status(format!("Poll: {:?}", outcome)),
                Err(e) => screen.set_status(format!("Poll failed: {}", e)),
            }
        }
        self.refresh_snapshot();
    }
}
