//! Application settings and configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Application settings
///
/// Persistent configuration for the Greenchat client.
/// Settings are stored in JSON format and can be loaded/saved from disk.
///
/// # Example
/// ```rust,no_run
/// use greenchat::storage::Settings;
///
/// // Load settings (returns default if file doesn't exist)
/// let mut settings = Settings::load("settings.json").expect("Failed to load");
///
/// // Poll faster and save
/// settings.poll_interval_secs = 2;
/// settings.save("settings.json").expect("Failed to save");
///
/// println!("Gateway: {}", settings.api_url);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gateway base URL
    pub api_url: String,
    /// Seconds between notification polls
    pub poll_interval_secs: u64,
    /// Number of messages fetched on history backfill
    pub history_count: u32,
    /// Transport-level timeout for gateway requests in seconds
    pub request_timeout_secs: u64,
    /// Where the instance credentials are persisted
    pub credentials_path: String,
    /// Log file written by the TUI
    pub log_path: String,
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the settings file
    ///
    /// # Returns
    /// The loaded settings, or default settings if file doesn't exist
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read settings: {}", e)))?;

        // Handle empty file (return defaults)
        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut settings: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Storage(format!("Failed to parse settings: {}", e)))?;
        settings.normalize();

        Ok(settings)
    }

    /// Save settings to a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to save the settings file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create settings directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Storage(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, json)
            .map_err(|e| Error::Storage(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Poll interval as a `Duration`
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Clamp zero values that would spin or request nothing
    fn normalize(&mut self) {
        if self.poll_interval_secs == 0 {
            self.poll_interval_secs = 1;
        }
        if self.history_count == 0 {
            self.history_count = Self::default().history_count;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = Self::default().request_timeout_secs;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.green-api.com".to_string(),
            poll_interval_secs: 5,
            history_count: 10,
            request_timeout_secs: 30,
            credentials_path: "./app_data/credentials.json".to_string(),
            log_path: "./app_data/greenchat.log".to_string(),
        }
    }
}
