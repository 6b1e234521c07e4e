// SPDX-License-Identifier: Apache-2.0

//! Error types for repoharvest.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during harvesting operations.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// GitHub API error from octocrab.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// The GitHub core rate limit is exhausted.
    ///
    /// Recovered by sleeping until the reset time; never fatal to the run.
    #[error("GitHub rate limit exhausted")]
    RateLimited {
        /// Unix timestamp of the advertised reset, when known.
        reset_at: Option<u64>,
    },

    /// A repository object whose `id` field does not parse as an integer.
    ///
    /// The record is skipped and never written to the store.
    #[error("repository id {raw:?} is not an integer")]
    MalformedId {
        /// The raw JSON value of the `id` field.
        raw: String,
    },

    /// The store's `id` column cannot be read back as numbers.
    ///
    /// Fatal: without a valid cursor, resumption cannot proceed safely.
    #[error("checkpoint unreadable: {message}")]
    Checkpoint {
        /// What failed while deriving the cursor.
        message: String,
    },

    /// CSV serialization or parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Store I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl From<octocrab::Error> for HarvestError {
    fn from(err: octocrab::Error) -> Self {
        HarvestError::GitHub {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for HarvestError {
    fn from(err: config::ConfigError) -> Self {
        HarvestError::Config {
            message: err.to_string(),
        }
    }
}
