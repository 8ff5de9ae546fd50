//! Clipboard access for pasting credentials
//!
//! Instance ids and API tokens are long and usually copied from the GREEN-API
//! console, so the login screen reads them from the system clipboard. Reads
//! go through `ClipboardProvider` so tests can script the clipboard.

/// Why a paste produced no text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard is reachable (headless session, SSH without forwarding)
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard holds no text, or only whitespace
    #[error("Clipboard is empty")]
    Empty,
}

/// Result type for clipboard reads
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Source of pasted text
pub trait ClipboardProvider {
    /// Raw clipboard text
    fn get_text(&mut self) -> ClipboardResult<String>;

    /// Clipboard text as a single credential value
    ///
    /// Whitespace anywhere in the value is dropped; copied tokens often pick
    /// up a trailing newline or a wrapped line break.
    fn paste_value(&mut self) -> ClipboardResult<String> {
        let value: String = self
            .get_text()?
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if value.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(value)
    }
}

/// System clipboard backed by arboard
pub struct RealClipboard {
    inner: arboard::Clipboard,
}

impl RealClipboard {
    /// Connect to the system clipboard
    pub fn new() -> ClipboardResult<Self> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl ClipboardProvider for RealClipboard {
    fn get_text(&mut self) -> ClipboardResult<String> {
        self.inner.get_text().map_err(|e| match e {
            arboard::Error::ContentNotAvailable => ClipboardError::Empty,
            other => ClipboardError::Unavailable(other.to_string()),
        })
    }
}
