//! Authenticated session
//!
//! A `Session` is created when login succeeds (or saved credentials are
//! resumed) and torn down on logout. It owns the credentials, the chat
//! controller and the poll task.

use crate::messaging::ChatController;
use crate::poller::{PollHandle, Poller};
use crate::storage::{CredentialStore, Credentials, Settings};
use crate::transport::{Gateway, HttpGateway};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Message shown when the gateway rejects the credentials
pub const INVALID_CREDENTIALS: &str =
    "Invalid credentials. Check idInstance and apiTokenInstance.";

/// Context object for one logged-in instance
pub struct Session {
    credentials: Credentials,
    controller: ChatController,
    poll_interval: Duration,
    poller: Option<PollHandle>,
}

impl Session {
    /// Verify credentials against the gateway and persist them
    ///
    /// Credentials are saved only after the gateway accepts them.
    pub async fn login(
        settings: &Settings,
        credential_store: &CredentialStore,
        credentials: Credentials,
    ) -> Result<Self> {
        let gateway = HttpGateway::new(settings, &credentials)?;
        Self::login_with_gateway(settings, credential_store, credentials, Arc::new(gateway)).await
    }

    /// `login` with an explicit gateway
    pub async fn login_with_gateway(
        settings: &Settings,
        credential_store: &CredentialStore,
        credentials: Credentials,
        gateway: Arc<dyn Gateway>,
    ) -> Result<Self> {
        credentials.validate()?;

        if let Err(e) = gateway.check_auth().await {
            warn!("Login rejected for instance {}: {}", credentials.id_instance, e);
            return Err(match e {
                Error::Transport { status, payload, .. } => Error::Transport {
                    message: INVALID_CREDENTIALS.to_string(),
                    status,
                    payload,
                },
                other => other,
            });
        }

        credential_store.save(&credentials)?;
        info!("Logged in to instance {}", credentials.id_instance);

        Ok(Self::with_gateway(credentials, gateway, settings))
    }

    /// Rebuild a session from saved credentials without a round trip
    pub fn resume(settings: &Settings, credential_store: &CredentialStore) -> Result<Option<Self>> {
        let Some(credentials) = credential_store.load()? else {
            return Ok(None);
        };

        let gateway = HttpGateway::new(settings, &credentials)?;
        info!("Resumed session for instance {}", credentials.id_instance);
        Ok(Some(Self::with_gateway(credentials, Arc::new(gateway), settings)))
    }

    /// Build a session around an existing gateway
    pub fn with_gateway(credentials: Credentials, gateway: Arc<dyn Gateway>, settings: &Settings) -> Self {
        Self {
            credentials,
            controller: ChatController::new(gateway, settings.history_count),
            poll_interval: settings.poll_interval(),
            poller: None,
        }
    }

    /// Start the recurring notification poll (requires a tokio runtime)
    pub fn start_polling(&mut self) {
        if self.is_polling() {
            return;
        }
        self.poller = Some(Poller::new(self.controller.clone(), self.poll_interval).start());
    }

    /// Cancel the notification poll
    pub fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }

    /// Whether the poll task is running
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Stop polling and forget the saved credentials
    pub fn logout(mut self, credential_store: &CredentialStore) -> Result<()> {
        self.stop_polling();
        credential_store.clear()?;
        info!("Logged out of instance {}", self.credentials.id_instance);
        Ok(())
    }

    /// Credentials of this session
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Chat controller of this session
    pub fn controller(&self) -> &ChatController {
        &self.controller
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
