// SPDX-License-Identifier: Apache-2.0

//! GitHub API rate limit status and backoff arithmetic.
//!
//! Provides utilities to check rate limit status and to compute how long
//! the fetch loop should sleep once the limit is exhausted.

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

/// Safety margin added on top of the advertised reset time, in seconds.
pub const RESET_MARGIN_SECS: u64 = 5;

/// GitHub API rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Number of API calls remaining in the current rate limit window.
    pub remaining: u32,
    /// Total number of API calls allowed in the rate limit window.
    pub limit: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset_at: u64,
}

impl RateLimitStatus {
    /// Returns true if rate limit is low (remaining < 100).
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < 100
    }

    /// Returns a human-readable status message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "GitHub API: {}/{} calls remaining",
            self.remaining, self.limit
        )
    }
}

/// Computes how long to sleep until the rate limit resets.
///
/// The duration is `reset_at - now` plus a 5 second margin so the window
/// has definitely rolled over when the loop resumes. A reset in the past
/// clamps to zero (no delay).
#[must_use]
pub fn backoff_duration(reset_at: u64, now: u64) -> Duration {
    let margin = i64::try_from(RESET_MARGIN_SECS).unwrap_or(5);
    let reset = i64::try_from(reset_at).unwrap_or(i64::MAX);
    let current = i64::try_from(now).unwrap_or(i64::MAX);
    let secs = reset.saturating_sub(current).saturating_add(margin);
    Duration::from_secs(u64::try_from(secs).unwrap_or(0))
}

/// Current Unix time in seconds.
#[must_use]
pub fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Checks the GitHub API rate limit status.
///
/// Uses the Octocrab client to fetch the current core rate limit from the
/// GitHub API. Works both authenticated and unauthenticated (the limits
/// differ: 5000 vs 60 requests per hour).
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn check_rate_limit(client: &octocrab::Octocrab) -> Result<RateLimitStatus> {
    debug!("Checking GitHub API rate limit");

    let rate_limit = client.ratelimit().get().await?;

    #[allow(clippy::cast_possible_truncation)]
    let status = RateLimitStatus {
        remaining: rate_limit.resources.core.remaining as u32,
        limit: rate_limit.resources.core.limit as u32,
        reset_at: rate_limit.resources.core.reset,
    };

    debug!(
        remaining = status.remaining,
        limit = status.limit,
        reset_at = status.reset_at,
        "GitHub rate limit status"
    );

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_adds_margin() {
        // Reset at T, now T - 10: sleep 10 + 5 seconds.
        let t = 1_700_000_000;
        assert_eq!(backoff_duration(t, t - 10), Duration::from_secs(15));
    }

    #[test]
    fn test_backoff_at_reset_is_margin_only() {
        let t = 1_700_000_000;
        assert_eq!(backoff_duration(t, t), Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_past_reset_clamps_to_zero() {
        let t = 1_700_000_000;
        assert_eq!(backoff_duration(t, t + 60), Duration::ZERO);
    }

    #[test]
    fn test_rate_limit_status_is_low_true() {
        let status = RateLimitStatus {
            remaining: 50,
            limit: 5000,
            reset_at: 1_234_567_890,
        };
        assert!(status.is_low());
    }

    #[test]
    fn test_rate_limit_status_is_low_boundary() {
        let status = RateLimitStatus {
            remaining: 100,
            limit: 5000,
            reset_at: 1_234_567_890,
        };
        assert!(!status.is_low());
    }

    #[test]
    fn test_rate_limit_status_message() {
        let status = RateLimitStatus {
            remaining: 42,
            limit: 5000,
            reset_at: 1_234_567_890,
        };
        assert_eq!(status.message(), "GitHub API: 42/5000 calls remaining");
    }
}
