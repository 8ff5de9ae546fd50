//! Gateway transport module
//!
//! This module talks to the GREEN-API REST gateway:
//! - `Gateway` trait with one operation per gateway capability
//! - `HttpGateway`, the reqwest implementation
//! - Normalization of every failure into `Error::Transport` / `Error::Protocol`

use crate::protocol::{
    chat_id_for, ChatHistoryRequest, HistoryEntry, MessageDetail, Notification,
    SendMessageRequest, SendMessageResponse,
};
use crate::storage::{Credentials, Settings};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Operations offered by the messaging gateway
///
/// Implementations hold no local state beyond their network client; every
/// failure is reported as a normalized `Error`.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Verify the instance credentials
    async fn check_auth(&self) -> Result<()>;

    /// Send a text message, returning the gateway-issued message id
    async fn send_message(&self, counterpart_id: &str, text: &str) -> Result<String>;

    /// Take the next pending notification, if any
    async fn poll_notification(&self) -> Result<Option<Notification>>;

    /// Resolve a message id into the full message
    async fn fetch_message(&self, id_message: &str) -> Result<MessageDetail>;

    /// Fetch up to `count` prior messages of a conversation
    async fn fetch_history(&self, counterpart_id: &str, count: u32) -> Result<Vec<HistoryEntry>>;

    /// Delete a processed notification from the gateway queue
    async fn acknowledge_notification(&self, receipt_id: u64) -> Result<()>;
}

/// GREEN-API gateway over HTTP
#[derive(Clone)]
pub struct HttpGateway {
    /// `{api_url}/waInstance{id}`
    base_url: String,
    /// API token, appended to every path
    token: String,
    /// HTTP client with the transport-level timeout
    client: Client,
}

impl HttpGateway {
    /// Create a gateway client for an instance
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: format!(
                "{}/waInstance{}",
                settings.api_url.trim_end_matches('/'),
                credentials.id_instance
            ),
            token: credentials.api_token_instance.clone(),
            client,
        })
    }

    /// Base URL of the instance (without the token)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, method_name: &str, suffix: Option<&str>) -> RequestBuilder {
        let url = match suffix {
            Some(suffix) => format!("{}/{}/{}/{}", self.base_url, method_name, self.token, suffix),
            None => format!("{}/{}/{}", self.base_url, method_name, self.token),
        };
        self.client.request(method, url)
    }

    /// Execute a request and return the body of a successful response
    async fn execute(&self, method_name: &str, request: RequestBuilder) -> Result<String> {
        debug!("Calling gateway method {}", method_name);

        let response = request.send().await.map_err(|e| {
            let err = Error::from(e);
            error!("Gateway call {} failed: {}", method_name, err);
            err
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            warn!("Gateway call {} returned status {}", method_name, status);
            Err(normalize_error(status, &body))
        }
    }
}

/// Build a transport error from a non-success response
///
/// The gateway's own `message` field wins over the generic status text.
fn normalize_error(status: StatusCode, body: &str) -> Error {
    let payload = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .or_else(|| (!body.trim().is_empty()).then(|| serde_json::Value::String(body.to_string())));

    let message = payload
        .as_ref()
        .and_then(|p| p.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    Error::Transport {
        message,
        status: Some(status.as_u16()),
        payload,
    }
}

fn decode<T: DeserializeOwned>(method_name: &str, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| Error::Protocol(format!("Unexpected {} response: {}", method_name, e)))
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn check_auth(&self) -> Result<()> {
        info!("Checking gateway credentials for {}", self.base_url);
        self.execute("getSettings", self.request(Method::GET, "getSettings", None))
            .await?;
        Ok(())
    }

    async fn send_message(&self, counterpart_id: &str, text: &str) -> Result<String> {
        let payload = SendMessageRequest {
            chat_id: chat_id_for(counterpart_id),
            message: text.to_string(),
        };
        let request = self.request(Method::POST, "SendMessage", None).json(&payload);
        let body = self.execute("SendMessage", request).await?;
        let response: SendMessageResponse = decode("SendMessage", &body)?;

        info!("Sent message {} to {}", response.id_message, counterpart_id);
        Ok(response.id_message)
    }

    async fn poll_notification(&self) -> Result<Option<Notification>> {
        let body = self
            .execute(
                "receiveNotification",
                self.request(Method::GET, "receiveNotification", None),
            )
            .await?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        decode("receiveNotification", &body)
    }

    async fn fetch_message(&self, id_message: &str) -> Result<MessageDetail> {
        let body = self
            .execute(
                "getMessage",
                self.request(Method::GET, "getMessage", Some(id_message)),
            )
            .await?;
        decode("getMessage", &body)
    }

    async fn fetch_history(&self, counterpart_id: &str, count: u32) -> Result<Vec<HistoryEntry>> {
        let payload = ChatHistoryRequest {
            chat_id: chat_id_for(counterpart_id),
            count,
        };
        let request = self.request(Method::POST, "getChatHistory", None).json(&payload);
        let body = self.execute("getChatHistory", request).await?;
        let entries: Vec<HistoryEntry> = decode("getChatHistory", &body)?;

        debug!("Fetched {} history entries for {}", entries.len(), counterpart_id);
        Ok(entries)
    }

    async fn acknowledge_notification(&self, receipt_id: u64) -> Result<()> {
        let receipt = receipt_id.to_string();
        self.execute(
            "DeleteNotification",
            self.request(Method::DELETE, "DeleteNotification", Some(&receipt)),
        )
        .await?;

        debug!("Acknowledged notification {}", receipt_id);
        Ok(())
    }
}
