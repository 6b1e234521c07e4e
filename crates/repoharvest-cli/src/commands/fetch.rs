// SPDX-License-Identifier: Apache-2.0

//! Harvest command: the resumable fetch loop.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::OutputContext;
use repoharvest_core::github::{GithubSource, create_client, resolve_token};
use repoharvest_core::{
    AppConfig, CsvStore, FetchOptions, Fetcher, RepoFilter, check_rate_limit,
};

/// Arguments for the fetch command, CLI flags overriding configuration.
pub struct FetchArgs {
    /// CSV store override.
    pub file: Option<PathBuf>,
    /// Language filter override.
    pub language: Option<String>,
    /// Explicit API token.
    pub token: Option<String>,
    /// Starting cursor for an empty store.
    pub since: Option<u64>,
    /// Stop when the listing is exhausted.
    pub once: bool,
    /// Keep forks as well.
    pub include_forks: bool,
}

/// Runs the harvest loop until cancelled or, with `--once`, until the
/// listing is exhausted.
pub async fn run(
    args: FetchArgs,
    ctx: &OutputContext,
    config: &AppConfig,
    cancel: CancellationToken,
) -> Result<()> {
    let explicit = args.token.map(SecretString::from);
    let token = resolve_token(explicit.as_ref());
    if token.is_none() && !ctx.quiet {
        eprintln!(
            "{}",
            style("No API token found, running unauthenticated (60 requests/hour).").yellow()
        );
    }

    let client = create_client(
        token.as_ref().map(|(t, _)| t),
        config.github.api_timeout_seconds,
    )?;
    if let Some((_, source)) = &token {
        debug!(%source, "Using GitHub token");
    }

    // Startup banner: confirms connectivity and shows the remaining quota.
    let spinner = super::maybe_spinner(ctx, "Checking GitHub rate limit...");
    let status = check_rate_limit(&client)
        .await
        .context("Failed to reach the GitHub API")?;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    if !ctx.quiet {
        let line = status.message();
        if status.is_low() {
            eprintln!("{}", style(line).yellow());
        } else {
            eprintln!("{line}");
        }
    }

    let output_file = args
        .file
        .unwrap_or_else(|| config.harvest.output_file.clone());
    let language = args
        .language
        .unwrap_or_else(|| config.harvest.language.clone());

    let store = CsvStore::open(&output_file)
        .with_context(|| format!("Failed to open store {}", output_file.display()))?;
    info!(
        store = %output_file.display(),
        language = %language,
        "Starting harvest"
    );

    let filter = RepoFilter {
        language,
        include_forks: args.include_forks,
    };
    let options = FetchOptions {
        start_cursor: args.since,
        stop_on_empty: args.once || config.harvest.stop_on_empty,
        empty_page_delay: Duration::from_secs(config.harvest.empty_page_delay_seconds),
    };

    let mut fetcher = Fetcher::new(GithubSource::new(client), store, filter, options);
    fetcher.run(&cancel).await?;

    if cancel.is_cancelled() && !ctx.quiet {
        eprintln!("Interrupted, exiting.");
    }
    Ok(())
}
