// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Repoharvest Core
//!
//! Core library for the repoharvest CLI - resumable harvesting of public
//! GitHub repositories into a CSV store.
//!
//! This crate provides reusable components for:
//! - Paginated enumeration of public repositories via the GitHub REST API
//! - Projection of repository objects into flat CSV records
//! - An append-only CSV store whose maximum `id` doubles as the resume cursor
//! - Rate-limit aware backoff and transient-error retry
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repoharvest_core::{CsvStore, FetchOptions, Fetcher, RepoFilter};
//! use repoharvest_core::github::{GithubSource, create_client};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = create_client(None, 10)?;
//! let store = CsvStore::open("repos.csv")?;
//! let filter = RepoFilter::language("C");
//!
//! let mut fetcher = Fetcher::new(
//!     GithubSource::new(client),
//!     store,
//!     filter,
//!     FetchOptions::default(),
//! );
//! fetcher.run(&CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`fetcher`] - The resumable pagination loop
//! - [`filter`] - The acceptance predicate
//! - [`github`] - GitHub API client and repository source
//! - [`ratelimit`] - Rate limit status and backoff arithmetic
//! - [`record`] - Repository record projection
//! - [`store`] - Append-only CSV store and checkpoint derivation

pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod github;
pub mod ratelimit;
pub mod record;
pub mod retry;
pub mod store;

pub use error::HarvestError;

/// Convenience Result type for repoharvest operations.
///
/// This is equivalent to `std::result::Result<T, HarvestError>`.
pub type Result<T> = std::result::Result<T, HarvestError>;

pub use config::{AppConfig, GitHubConfig, HarvestConfig, config_dir, config_file_path, load_config};
pub use fetcher::{FetchOptions, Fetcher, RepoSource};
pub use filter::RepoFilter;
pub use ratelimit::{RateLimitStatus, backoff_duration, check_rate_limit};
pub use record::RepoRecord;
pub use store::CsvStore;
