//! HookRelay CI/CD infrastructure adapter.
//!
//! Implements the [`router::PipelineTrigger`] trait by posting the
//! [`router::PipelineRequest`] as JSON to a configured endpoint:
//!
//! ```json
//! {"repository":"org/repo","branch":"main","commit":"abc123","author":"alice"}
//! ```
//!
//! When a token is configured it is sent as `Authorization: Bearer <token>`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport and authentication live here. The
//! [`router`] crate sees only [`router::PipelineTrigger`].

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use router::{CollaboratorError, PipelineRequest, PipelineTrigger};

/// Errors produced while triggering a pipeline.
#[derive(Debug, Error)]
pub enum CicdError {
    #[error("Pipeline trigger request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Pipeline trigger endpoint rejected the request with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Triggers builds by calling an HTTP endpoint.
#[derive(Clone)]
pub struct HttpPipelineTrigger {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpPipelineTrigger {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Sends `token` as a bearer credential on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn send(&self, request: &PipelineRequest) -> Result<(), CicdError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CicdError::Rejected { status, body });
        }

        debug!(
            %status,
            repository = %request.repository,
            branch = %request.branch,
            "Pipeline trigger accepted"
        );
        Ok(())
    }
}

// Manual impl so the token never ends up in logs.
impl std::fmt::Debug for HttpPipelineTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPipelineTrigger")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl PipelineTrigger for HttpPipelineTrigger {
    async fn trigger(&self, request: &PipelineRequest) -> Result<(), CollaboratorError> {
        self.send(request).await.map_err(Into::into)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
