// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `HarvestError` and adds actionable hints
//! for different failure classes, keeping the structured error data in the
//! library and the presentation here.

use anyhow::Error;
use repoharvest_core::HarvestError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `HarvestError`, returns the original error message.
#[must_use]
pub fn format_error(error: &Error) -> String {
    if let Some(harvest_err) = error.downcast_ref::<HarvestError>() {
        match harvest_err {
            HarvestError::GitHub { message: _ } => {
                format!(
                    "{harvest_err}\n\nTip: Check your token and network; unauthenticated access is limited to 60 requests per hour."
                )
            }
            HarvestError::RateLimited { .. } => {
                format!(
                    "{harvest_err}\n\nTip: Provide a token with --token or GITHUB_TOKEN to raise the limit from 60 to 5000 requests per hour."
                )
            }
            HarvestError::Checkpoint { message: _ } => {
                format!(
                    "{harvest_err}\n\nTip: The store's id column must contain only integers. Repair or move the CSV file before resuming."
                )
            }
            HarvestError::Config { message: _ } => {
                format!(
                    "{harvest_err}\n\nTip: Check your config file at {}",
                    repoharvest_core::config_file_path().display()
                )
            }
            _ => harvest_err.to_string(),
        }
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_checkpoint_error() {
        let error = HarvestError::Checkpoint {
            message: "store repos.csv has non-integer id \"abc\"".to_string(),
        };
        let formatted = format_error(&anyhow::Error::new(error));
        assert!(formatted.contains("checkpoint unreadable"));
        assert!(formatted.contains("id column"));
    }

    #[test]
    fn test_format_rate_limited_error() {
        let error = HarvestError::RateLimited { reset_at: None };
        let formatted = format_error(&anyhow::Error::new(error));
        assert!(formatted.contains("rate limit"));
        assert!(formatted.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_format_non_harvest_error() {
        let error = anyhow::anyhow!("Some generic error");
        assert_eq!(format_error(&error), "Some generic error");
    }
}
