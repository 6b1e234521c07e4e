// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the repoharvest CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging. Two
//! layers are installed:
//!
//! - a stderr layer controlled by `RUST_LOG` (default: info for
//!   repoharvest, errors only for dependencies), and
//! - an append-only, WARN-filtered file layer on the configured error log,
//!   so entity-level skips survive the terminal scrollback.
//!
//! # Examples
//!
//! ```bash
//! # Default: per-record progress on stderr
//! repoharvest fetch
//!
//! # Debug output for troubleshooting
//! RUST_LOG=repoharvest=debug repoharvest fetch
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::OutputFormat;

/// Initialize the logging subsystem.
///
/// Structured formats stay quiet on stderr so their stdout remains
/// machine-readable. When the error log cannot be opened, logging falls
/// back to stderr only.
///
/// # Arguments
///
/// * `format` - Output format (structured formats are quiet)
/// * `error_log` - Path of the append-only error log
pub fn init_logging(format: OutputFormat, error_log: &Path) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = match format {
        OutputFormat::Json => "repoharvest=warn,octocrab=error",
        OutputFormat::Text => "repoharvest=info,octocrab=error",
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_log)
        .ok()
        .map(|file| {
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(LevelFilter::WARN)
        });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(file_layer)
        .init();
}
