//! Read-only router configuration.
//!
//! A [`RouterConfig`] is handed to [`crate::EventRouter::new`] once and never
//! changes afterwards; concurrent dispatches share it without locking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Commit;

/// File names whose addition or modification is reported by default.
pub const DEFAULT_SENSITIVE_FILES: [&str; 4] =
    [".env", "config.json", "secrets.yaml", "credentials.json"];

// ---------------------------------------------------------------------------
// Sensitive files
// ---------------------------------------------------------------------------

/// Set of changed-path values that make a push "sensitive".
///
/// Matching is a case-sensitive, exact string comparison against the paths
/// GitHub reports. `config.json` matches only a root-level `config.json`;
/// `app/config.json` and `Config.json` do not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitiveFileSet(BTreeSet<String>);

impl SensitiveFileSet {
    /// Builds a set from arbitrary paths. Empty entries are dropped.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            paths
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        )
    }

    /// Returns `true` if `path` is exactly one of the configured entries.
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    /// Returns `true` if any commit adds or modifies a sensitive path.
    pub fn touched_by(&self, commits: &[Commit]) -> bool {
        commits
            .iter()
            .any(|commit| commit.changed_paths().any(|path| self.contains(path)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SensitiveFileSet {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_FILES)
    }
}

// ---------------------------------------------------------------------------
// Logging policy
// ---------------------------------------------------------------------------

/// When the issue-comment, security-advisory and vulnerability-alert handlers
/// record their event.
///
/// Push and pull-request events are recorded unconditionally under both
/// policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingPolicy {
    /// Record only when the action triggers a notification (`created`,
    /// `published`). Other actions are dropped without a trace in the event
    /// log.
    #[default]
    MatchedActionsOnly,

    /// Record every event, then notify only for the triggering actions.
    Always,
}

// ---------------------------------------------------------------------------

/// Configuration injected into [`crate::EventRouter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub sensitive_files: SensitiveFileSet,
    pub logging: LoggingPolicy,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
