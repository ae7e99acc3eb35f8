//! HookRelay webhook receiver.
//!
//! Binds an HTTP server that accepts GitHub webhook deliveries, parses each
//! body once into a [`router::EventEnvelope`] and hands it to the
//! [`router::EventRouter`].
//!
//! ## Endpoints
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `POST` | `/webhook` | `200` processed, `202` unsupported event ignored, `400` bad request, `500` collaborator failure |
//! | `GET` | `/healthz` | `200 ok` |
//!
//! Deliveries are handled inline: the response is sent after the router has
//! finished, so a `500` tells GitHub the delivery failed and can be
//! redelivered from the repository settings.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP framing, header extraction, and status mapping
//! live here. Webhook signatures are not verified by this crate; deploy it
//! behind a component that does.

use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use router::EventRouter;

pub mod error;
pub mod webhook;

pub use error::{ListenerError, WebhookError};

/// GitHub caps webhook payloads at 25 MB.
pub const MAX_PAYLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the axum Router with the webhook and health routes.
/// Used by [`serve`] and available for integration testing.
pub fn build_router(event_router: EventRouter) -> Router {
    Router::new()
        .route("/webhook", post(webhook::receive_webhook))
        .route("/healthz", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(event_router)
}

/// Serves webhooks on `addr` until Ctrl-C is received.
pub async fn serve(addr: SocketAddr, event_router: EventRouter) -> Result<(), ListenerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;
    info!(%addr, "Webhook listener bound");

    axum::serve(listener, build_router(event_router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ListenerError::Serve)?;

    info!("Webhook listener stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Could not install Ctrl-C handler; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
