//! `POST /webhook` handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info, instrument};
use uuid::Uuid;

use router::{parse_event, EventRouter, PayloadError};

use crate::WebhookError;

/// Names the GitHub event type of the delivery.
pub const EVENT_HEADER: &str = "x-github-event";
/// Unique id GitHub assigns to each delivery.
pub const DELIVERY_HEADER: &str = "x-github-delivery";

pub async fn receive_webhook(
    State(event_router): State<EventRouter>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), WebhookError> {
    let delivery = headers
        .get(DELIVERY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingEventHeader)?;

    process(&event_router, event, &delivery, &body).await
}

#[instrument(name = "webhook", skip_all, fields(event = %event, delivery = %delivery))]
async fn process(
    event_router: &EventRouter,
    event: &str,
    delivery: &str,
    body: &[u8],
) -> Result<(StatusCode, Json<Value>), WebhookError> {
    let envelope = match parse_event(event, body) {
        Ok(envelope) => envelope,
        Err(PayloadError::UnsupportedEvent(name)) => {
            info!("Ignoring unsupported event");
            return Ok((
                StatusCode::ACCEPTED,
                Json(json!({ "status": "ignored", "event": name, "delivery": delivery })),
            ));
        }
        Err(e) => {
            info!(error = %e, "Rejecting malformed payload");
            return Err(e.into());
        }
    };

    event_router.dispatch(&envelope).await.inspect_err(|e| {
        error!(
            error = %e,
            cause = %e.source,
            repository = %envelope.repository(),
            "Event handling failed"
        );
    })?;

    info!(repository = %envelope.repository(), "Event processed");
    Ok((
        StatusCode::OK,
        Json(json!({ "status": "processed", "delivery": delivery })),
    ))
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
