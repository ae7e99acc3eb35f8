//! HookRelay Slack infrastructure adapter.
//!
//! Implements the [`router::Notifier`] trait by posting each message to a
//! Slack [incoming webhook](https://api.slack.com/messaging/webhooks) as
//! `{"text": "<message>"}`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport and Slack response handling live here.
//! The [`router`] crate sees only [`router::Notifier`].
//!
//! Delivery is attempted once. A transport error or a non-2xx response is
//! returned to the router as a [`SlackError`]; retrying is the caller's
//! concern.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use router::{CollaboratorError, Notifier};

/// Errors produced while delivering a Slack message.
#[derive(Debug, Error)]
pub enum SlackError {
    /// The request could not be sent or its response could not be read.
    #[error("Slack webhook request failed")]
    Transport(#[from] reqwest::Error),

    /// Slack answered with a non-success status (e.g. `invalid_payload`,
    /// `no_service`).
    #[error("Slack webhook rejected the message with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

#[derive(Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
}

/// Posts notifications to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), webhook_url)
    }

    /// Creates a notifier sharing an existing HTTP client (connection pool,
    /// timeouts, proxy settings).
    pub fn with_client(client: reqwest::Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }

    /// Sends one message.
    pub async fn send(&self, text: &str) -> Result<(), SlackError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&SlackMessage { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Rejected { status, body });
        }

        debug!(%status, "Slack message delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, message: &str) -> Result<(), CollaboratorError> {
        self.send(message).await.map_err(Into::into)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
