// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for repoharvest.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    #[must_use]
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Repoharvest - resumable harvesting of public GitHub repositories.
///
/// Enumerates public repositories in ascending-id order, keeps the ones
/// matching the configured language filter, and appends them to a CSV
/// file that doubles as the resume checkpoint.
#[derive(Parser)]
#[command(name = "repoharvest")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Harvest public repositories into the CSV store
    Fetch {
        /// CSV file to append records to (overrides config)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Primary language a repository must report (overrides config)
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// GitHub API token; falls back to GH_TOKEN / GITHUB_TOKEN, then
        /// unauthenticated access (60 requests per hour)
        #[arg(long)]
        token: Option<String>,

        /// Starting repository id when the store is empty (lower-exclusive)
        #[arg(long)]
        since: Option<u64>,

        /// Stop when the listing is exhausted instead of polling
        #[arg(long)]
        once: bool,

        /// Keep forks as well as source repositories
        #[arg(long)]
        include_forks: bool,
    },

    /// Show the store's record count and resume checkpoint
    Status {
        /// CSV store to inspect (overrides config)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Generate a shell completion script to stdout
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
