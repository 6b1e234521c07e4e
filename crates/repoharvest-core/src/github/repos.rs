// SPDX-License-Identifier: Apache-2.0

//! Public repository listing via the GitHub REST API.
//!
//! `GET /repositories` lists every public repository in ascending-id order,
//! bounded below (exclusively) by the `since` parameter. The listing only
//! carries summary objects - notably without `language` - so each entity is
//! hydrated with `GET /repositories/{id}` before filtering.

use async_trait::async_trait;
use backon::Retryable;
use octocrab::Octocrab;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::HarvestError;
use crate::fetcher::RepoSource;
use crate::ratelimit::check_rate_limit;
use crate::retry::{is_rate_limit_octocrab, is_transient_octocrab, retry_backoff};

/// [`RepoSource`] implementation over the GitHub REST API.
pub struct GithubSource {
    client: Octocrab,
}

impl GithubSource {
    /// Wraps an Octocrab client.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    async fn page_once(&self, since: Option<u64>) -> Result<Vec<Value>, octocrab::Error> {
        let route = match since {
            Some(id) => format!("/repositories?since={id}"),
            None => "/repositories".to_string(),
        };
        self.client.get(route, None::<&()>).await
    }
}

/// Maps an octocrab error, routing rate limit exhaustion to its own variant.
fn map_api_error(e: octocrab::Error) -> HarvestError {
    if is_rate_limit_octocrab(&e) {
        HarvestError::RateLimited { reset_at: None }
    } else {
        e.into()
    }
}

#[async_trait]
impl RepoSource for GithubSource {
    #[instrument(skip(self))]
    async fn page_since(&self, since: Option<u64>) -> Result<Vec<Value>, HarvestError> {
        let page = (|| self.page_once(since))
            .retry(retry_backoff())
            .when(is_transient_octocrab)
            .await
            .map_err(map_api_error)?;
        debug!(count = page.len(), "Fetched repository listing page");
        Ok(page)
    }

    async fn details(&self, summary: &Value) -> Result<Value, HarvestError> {
        let id =
            summary
                .get("id")
                .and_then(Value::as_u64)
                .ok_or_else(|| HarvestError::MalformedId {
                    raw: summary.get("id").cloned().unwrap_or(Value::Null).to_string(),
                })?;

        let route = format!("/repositories/{id}");
        let repo = (|| async { self.client.get(&route, None::<&()>).await })
            .retry(retry_backoff())
            .when(is_transient_octocrab)
            .await
            .map_err(map_api_error)?;
        Ok(repo)
    }

    async fn rate_limit_reset(&self) -> Result<u64, HarvestError> {
        let status = check_rate_limit(&self.client)
            .await
            .map_err(|e| HarvestError::GitHub {
                message: e.to_string(),
            })?;
        Ok(status.reset_at)
    }
}
