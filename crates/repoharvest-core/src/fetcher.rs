// SPDX-License-Identifier: Apache-2.0

//! The resumable paginated fetch loop.
//!
//! [`Fetcher::run`] walks the remote's public repository listing in
//! ascending-id order, appends accepted records to the store, and keeps
//! going until cancelled. The cursor is never held as authoritative state:
//! after every backoff it is re-derived from the store, so a crash or
//! restart resumes exactly where the durable data ends.
//!
//! Failure semantics:
//! - per-entity errors are logged and skipped, the sequence continues
//! - rate limit exhaustion aborts the sequence, sleeps until reset + margin,
//!   then resumes from the store-derived cursor
//! - store and checkpoint errors are fatal

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::HarvestError;
use crate::filter::RepoFilter;
use crate::ratelimit::{backoff_duration, unix_now};
use crate::record::RepoRecord;
use crate::store::CsvStore;

/// A paginated source of repository objects, ordered by ascending id.
///
/// The trait seam keeps the loop testable without a network; the production
/// implementation is [`crate::github::GithubSource`].
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Returns one page of repository summaries with ids strictly greater
    /// than `since` (`None` means from the oldest). An empty page means the
    /// listing is exhausted for now.
    async fn page_since(&self, since: Option<u64>) -> Result<Vec<Value>, HarvestError>;

    /// Fetches the full repository object for a listing summary.
    async fn details(&self, summary: &Value) -> Result<Value, HarvestError>;

    /// Returns the Unix timestamp at which the rate limit window resets.
    async fn rate_limit_reset(&self) -> Result<u64, HarvestError>;
}

/// Options controlling the fetch loop.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Starting cursor when the store is empty. A non-empty store always
    /// wins, so a stale value can never cause re-fetching below the stored
    /// maximum.
    pub start_cursor: Option<u64>,
    /// Stop when the listing is exhausted instead of polling.
    pub stop_on_empty: bool,
    /// Delay before re-polling an exhausted listing.
    pub empty_page_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            start_cursor: None,
            stop_on_empty: false,
            empty_page_delay: Duration::from_secs(60),
        }
    }
}

/// Resumable paginated fetcher writing accepted records to a [`CsvStore`].
pub struct Fetcher<S> {
    source: S,
    store: CsvStore,
    filter: RepoFilter,
    options: FetchOptions,
}

impl<S: RepoSource> Fetcher<S> {
    /// Creates a fetcher over the given source, store and filter.
    pub fn new(source: S, store: CsvStore, filter: RepoFilter, options: FetchOptions) -> Self {
        Self {
            source,
            store,
            filter,
            options,
        }
    }

    /// Runs the fetch loop until cancelled, the listing is exhausted with
    /// `stop_on_empty` set, or a fatal error occurs.
    ///
    /// Cancellation is checked at the top of every iteration and raced
    /// against every sleep; a cancelled run returns `Ok`.
    ///
    /// # Errors
    ///
    /// Propagates store, checkpoint, and non-recoverable API errors. Rate
    /// limit exhaustion is handled internally and never surfaces.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<(), HarvestError> {
        loop {
            if cancel.is_cancelled() {
                info!("Cancellation requested, stopping fetch loop");
                return Ok(());
            }

            let cursor = self.store.last_id()?.or(self.options.start_cursor);
            info!(?cursor, "Fetching repositories since cursor");

            match self.harvest_sequence(cursor, cancel).await {
                Ok(appended) => {
                    if cancel.is_cancelled() {
                        info!("Cancellation requested, stopping fetch loop");
                        return Ok(());
                    }
                    info!(appended, "Listing exhausted");
                    if self.options.stop_on_empty {
                        return Ok(());
                    }
                    debug!(
                        delay_secs = self.options.empty_page_delay.as_secs(),
                        "Waiting before re-polling"
                    );
                    if wait_or_cancelled(cancel, self.options.empty_page_delay).await {
                        return Ok(());
                    }
                }
                Err(HarvestError::RateLimited { reset_at }) => {
                    let reset = match reset_at {
                        Some(reset) => reset,
                        None => self.source.rate_limit_reset().await?,
                    };
                    let delay = backoff_duration(reset, unix_now());
                    warn!(
                        delay_secs = delay.as_secs(),
                        reset, "Rate limit exhausted, backing off"
                    );
                    if wait_or_cancelled(cancel, delay).await {
                        return Ok(());
                    }
                    // Loop re-derives the cursor from the store on resume.
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Walks pages from `cursor` until the listing is exhausted.
    ///
    /// Advances through pages using the highest summary id seen, so a page
    /// full of non-matching repositories still makes progress. Returns the
    /// number of records appended.
    async fn harvest_sequence(
        &mut self,
        cursor: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<u64, HarvestError> {
        let mut since = cursor;
        let mut appended = 0u64;

        loop {
            let page = self.source.page_since(since).await?;
            if page.is_empty() {
                return Ok(appended);
            }

            let mut page_max: Option<u64> = None;
            for summary in &page {
                if cancel.is_cancelled() {
                    return Ok(appended);
                }
                if let Some(id) = summary.get("id").and_then(Value::as_u64) {
                    page_max = Some(page_max.map_or(id, |m| m.max(id)));
                }
                if self.harvest_entity(summary).await? {
                    appended += 1;
                }
            }

            // A page without a single readable id cannot advance the
            // cursor; treat the sequence as exhausted rather than spin.
            let Some(max) = page_max else {
                warn!("Page contained no readable ids, ending sequence");
                return Ok(appended);
            };
            since = Some(max);
        }
    }

    /// Hydrates, projects, filters and stores one entity.
    ///
    /// Returns `Ok(true)` when a record was appended. Per-entity remote
    /// errors and malformed ids are logged and swallowed; rate limiting
    /// and store failures propagate.
    async fn harvest_entity(&mut self, summary: &Value) -> Result<bool, HarvestError> {
        let raw = match self.source.details(summary).await {
            Ok(raw) => raw,
            Err(e @ HarvestError::RateLimited { .. }) => return Err(e),
            Err(e) => {
                warn!(error = %e, "Skipping repository after remote error");
                return Ok(false);
            }
        };

        let record = match RepoRecord::project(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Skipping repository with malformed record");
                return Ok(false);
            }
        };

        if !self.filter.matches(&record) {
            debug!(id = record.id, "Repository filtered out");
            return Ok(false);
        }

        self.store.append(&record)?;
        info!(
            id = record.id,
            repo = record.full_name.as_deref().unwrap_or("<unnamed>"),
            "Stored repository"
        );
        Ok(true)
    }
}

/// Sleeps for `delay`, racing cancellation. Returns true when cancelled.
async fn wait_or_cancelled(cancel: &CancellationToken, delay: Duration) -> bool {
    if delay.is_zero() {
        return cancel.is_cancelled();
    }
    tokio::select! {
        () = cancel.cancelled() => true,
        () = tokio::time::sleep(delay) => false,
    }
}
