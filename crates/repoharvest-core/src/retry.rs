// SPDX-License-Identifier: Apache-2.0

//! Retry logic with exponential backoff for transient failures.
//!
//! Transient failures (5xx, network) are retried in place with exponential
//! backoff. Rate limiting (429, or 403 carrying a rate limit message) is
//! deliberately NOT transient here: it takes the fetch loop's
//! sleep-until-reset path instead.

use backon::ExponentialBuilder;

/// Determines if an HTTP status code is a transient server failure.
///
/// Transient status codes are 500, 502, 503 and 504. Rate limit statuses
/// (429 and 403) are excluded: they are handled by the backoff-and-resume
/// path, not by in-place retries.
#[must_use]
pub fn is_retryable_http(status: u16) -> bool {
    matches!(status, 500 | 502 | 503 | 504)
}

/// Determines if an octocrab error is transient and worth retrying.
///
/// Covers GitHub API errors with transient status codes plus service and
/// network (hyper) errors.
#[must_use]
pub fn is_transient_octocrab(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => is_retryable_http(source.status_code.as_u16()),
        octocrab::Error::Service { .. } | octocrab::Error::Hyper { .. } => true,
        _ => false,
    }
}

/// Returns whether a GitHub API error reports rate limit exhaustion.
///
/// GitHub signals exhaustion with 429, or with 403 and a message that
/// names the rate limit (the primary limit uses 403).
#[must_use]
pub fn is_rate_limit_octocrab(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            status == 429
                || (status == 403 && source.message.to_ascii_lowercase().contains("rate limit"))
        }
        _ => false,
    }
}

/// Creates a configured exponential backoff builder for transient retries.
///
/// Factor 2, minimum delay 1 second, 3 attempts, with jitter.
#[must_use]
pub fn retry_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(std::time::Duration::from_secs(1))
        .with_max_times(3)
        .with_jitter()
}
