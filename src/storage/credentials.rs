//! Gateway instance credentials and their persistence

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// GREEN-API instance credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Instance id
    pub id_instance: String,
    /// Instance API token
    pub api_token_instance: String,
}

impl Credentials {
    /// Create credentials, trimming surrounding whitespace
    pub fn new(id_instance: &str, api_token_instance: &str) -> Self {
        Self {
            id_instance: id_instance.trim().to_string(),
            api_token_instance: api_token_instance.trim().to_string(),
        }
    }

    /// Both fields must be filled in
    pub fn validate(&self) -> Result<()> {
        if self.id_instance.is_empty() {
            return Err(Error::Validation("idInstance is required".to_string()));
        }
        if self.api_token_instance.is_empty() {
            return Err(Error::Validation("apiTokenInstance is required".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id_instance", &self.id_instance)
            .field("api_token_instance", &"<redacted>")
            .finish()
    }
}

/// JSON file holding the credentials between runs
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by the given file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved credentials; `None` if nothing was saved
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Storage(format!("Failed to read credentials: {}", e)))?;
        if data.trim().is_empty() {
            return Ok(None);
        }

        let credentials: Credentials = serde_json::from_str(&data)
            .map_err(|e| Error::Storage(format!("Failed to parse credentials: {}", e)))?;
        Ok(Some(credentials))
    }

    /// Persist credentials, creating the parent directory
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create credentials directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, json)
            .map_err(|e| Error::Storage(format!("Failed to write credentials: {}", e)))?;

        info!("Saved credentials for instance {}", credentials.id_instance);
        Ok(())
    }

    /// Forget saved credentials
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| Error::Storage(format!("Failed to remove credentials: {}", e)))?;
        }
        Ok(())
    }
}
