// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides token resolution and API client construction. Authentication is
//! optional: an unauthenticated client works against the public listing
//! endpoints, just with a far smaller rate limit (60 instead of 5000
//! requests per hour).

use std::time::Duration;

use anyhow::{Context, Result};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub mod repos;

pub use repos::GithubSource;

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token passed explicitly on the command line.
    Flag,
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "command line flag"),
            TokenSource::Environment => write!(f, "environment variable"),
        }
    }
}

/// Resolves a GitHub token using the priority chain.
///
/// Checks sources in order:
/// 1. An explicit token (the `--token` flag)
/// 2. `GH_TOKEN` environment variable
/// 3. `GITHUB_TOKEN` environment variable
///
/// Returns the token and its source, or `None` to run unauthenticated.
#[must_use]
pub fn resolve_token(explicit: Option<&SecretString>) -> Option<(SecretString, TokenSource)> {
    if let Some(token) = explicit {
        debug!("Using token from command line flag");
        return Some((token.clone(), TokenSource::Flag));
    }

    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            debug!("Using token from {var} environment variable");
            return Some((SecretString::from(token), TokenSource::Environment));
        }
    }

    debug!("No token found, running unauthenticated");
    None
}

/// Creates an Octocrab client, authenticated when a token is given.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn create_client(token: Option<&SecretString>, timeout_seconds: u64) -> Result<Octocrab> {
    let mut builder = Octocrab::builder()
        .set_connect_timeout(Some(Duration::from_secs(timeout_seconds)))
        .set_read_timeout(Some(Duration::from_secs(timeout_seconds)));

    if let Some(token) = token {
        builder = builder.personal_token(token.expose_secret().to_string());
    }

    builder.build().context("Failed to build GitHub client")
}
