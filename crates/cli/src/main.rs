//! HookRelay entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: flags and environment variables, validated
//!    before anything else starts (see [`config::Cli`]).
//! 2. **Wire observability**: configure `tracing-subscriber` with a JSON layer
//!    and, optionally, an OpenTelemetry OTLP exporter. All `tracing` spans and
//!    structured events emitted by every crate in the workspace flow through
//!    this layer.
//! 3. **Construct infrastructure**: create the concrete collaborators
//!    (`JsonLinesEventLogger`, `SlackNotifier`, `HttpPipelineTrigger`) and
//!    inject them into the `EventRouter`.
//! 4. **Serve**: run the webhook listener until Ctrl-C.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use audit::JsonLinesEventLogger;
use cicd::HttpPipelineTrigger;
use router::EventRouter;
use slack::SlackNotifier;

use crate::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let telemetry = telemetry::init(cli.log_format, cli.otlp_endpoint.as_deref())?;
    let result = run(cli).await;
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "HookRelay exited with an error");
    }
    telemetry.shutdown();
    result
}

async fn run(cli: Cli) -> Result<()> {
    let http = reqwest::Client::builder()
        .timeout(cli.http_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let logger = Arc::new(JsonLinesEventLogger::new(&cli.event_log));
    let notifier = Arc::new(SlackNotifier::with_client(
        http.clone(),
        &cli.slack_webhook_url,
    ));
    let mut trigger = HttpPipelineTrigger::with_client(http, &cli.cicd_url);
    if let Some(token) = &cli.cicd_token {
        trigger = trigger.with_token(token);
    }

    let config = cli.router_config();
    info!(
        bind = %cli.bind,
        event_log = %cli.event_log.display(),
        sensitive_files = ?config.sensitive_files.iter().collect::<Vec<_>>(),
        logging = ?config.logging,
        "Configuration loaded"
    );

    let event_router = EventRouter::new(config, logger, notifier, Arc::new(trigger));
    listener::serve(cli.bind, event_router).await?;
    Ok(())
}
