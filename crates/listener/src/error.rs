use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use router::{CollaboratorFailure, PayloadError};

/// Failure to run the HTTP server itself.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Failed to bind webhook listener on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Webhook listener stopped unexpectedly")]
    Serve(#[source] std::io::Error),
}

/// A single delivery could not be processed.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Missing or non-ASCII X-GitHub-Event header")]
    MissingEventHeader,

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Dispatch(#[from] CollaboratorFailure),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MissingEventHeader => StatusCode::BAD_REQUEST,
            WebhookError::Payload(PayloadError::UnsupportedEvent(_)) => StatusCode::ACCEPTED,
            WebhookError::Payload(PayloadError::Malformed { .. }) => StatusCode::BAD_REQUEST,
            WebhookError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
