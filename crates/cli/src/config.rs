//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through the environment variable
//! named in its `env` attribute; flags win.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use reqwest::Url;

use router::{LoggingPolicy, RouterConfig, SensitiveFileSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line human-readable output
    Pretty,
}

#[derive(Debug, Parser)]
#[command(
    name = "hookrelay",
    about = "Receive GitHub webhooks, alert on policy-relevant events, and trigger CI/CD",
    version
)]
pub struct Cli {
    /// Address the webhook listener binds to
    #[arg(long, env = "HOOKRELAY_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Slack incoming webhook URL notifications are posted to
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook_url: String,

    /// Endpoint that starts a CI/CD pipeline for a pushed commit
    #[arg(long, env = "CICD_TRIGGER_URL")]
    pub cicd_url: String,

    /// Bearer token sent to the CI/CD endpoint
    #[arg(long, env = "CICD_TRIGGER_TOKEN", hide_env_values = true)]
    pub cicd_token: Option<String>,

    /// JSON Lines file every recorded event is appended to
    #[arg(long, env = "HOOKRELAY_EVENT_LOG", default_value = "events.jsonl")]
    pub event_log: PathBuf,

    /// File name whose addition or modification triggers an alert
    /// (repeatable; replaces the built-in list)
    #[arg(
        long = "sensitive-file",
        env = "HOOKRELAY_SENSITIVE_FILES",
        value_delimiter = ','
    )]
    pub sensitive_files: Vec<String>,

    /// Record issue-comment and security events for every action, not only
    /// the ones that notify
    #[arg(long, env = "HOOKRELAY_ALWAYS_LOG")]
    pub always_log: bool,

    /// Timeout for outbound Slack and CI/CD requests, in seconds
    #[arg(long, env = "HOOKRELAY_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub http_timeout_secs: u64,

    /// Log output format
    #[arg(long, value_enum, env = "HOOKRELAY_LOG_FORMAT", default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// OTLP gRPC endpoint for trace export (disabled when unset)
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Cli {
    /// Rejects configuration the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        check_http_url("--slack-webhook-url", &self.slack_webhook_url)?;
        check_http_url("--cicd-url", &self.cicd_url)?;
        if self.http_timeout_secs == 0 {
            bail!("--http-timeout-secs must be greater than zero");
        }
        Ok(())
    }

    pub fn router_config(&self) -> RouterConfig {
        let sensitive_files = if self.sensitive_files.is_empty() {
            SensitiveFileSet::default()
        } else {
            SensitiveFileSet::new(self.sensitive_files.iter().map(|s| s.trim()))
        };
        let logging = if self.always_log {
            LoggingPolicy::Always
        } else {
            LoggingPolicy::MatchedActionsOnly
        };

        RouterConfig {
            sensitive_files,
            logging,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn check_http_url(flag: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{flag} is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{flag} must be an http(s) URL, got scheme '{}'", url.scheme());
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
