//! Newtype domain identifiers.
//!
//! Every name that travels through the router is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging, for
//! example, an [`IssueNumber`] with a [`PullRequestNumber`] even though both are
//! `u64` under the hood, or a [`BranchName`] with a [`RepositoryName`].
//!
//! All types deserialise from the primitive GitHub sends, so the payload parser
//! can decode them straight from the wire. String-backed identifiers go through
//! the same non-empty check as their constructors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string identifier was given an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} must not be empty")]
pub struct EmptyIdentifier(pub &'static str);

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, FromStr,
// TryFrom<String> (used by Deserialize).
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident => $label:literal
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdentifier($label))
            }
        }

        impl FromStr for $name {
            type Err = EmptyIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Number of a GitHub Pull Request within its repository.
    PullRequestNumber
}

u64_id! {
    /// Number of a GitHub Issue within its repository.
    ///
    /// Comments on pull requests are delivered as issue comments, so this may
    /// also carry a pull request number.
    IssueNumber
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (Git names and logins)
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a GitHub repository in `"owner/repo"` format.
    RepositoryName => "repository name"
}

string_id! {
    /// A Git branch name (e.g. `"main"`, `"feature/login"`), without the
    /// `refs/heads/` prefix.
    BranchName => "branch name"
}

string_id! {
    /// A Git commit SHA as GitHub reports it. The format is not checked.
    CommitSha => "commit SHA"
}

string_id! {
    /// A GitHub user login or, for pushes, the pusher's display name.
    UserLogin => "user login"
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;
