// SPDX-License-Identifier: Apache-2.0

//! Repoharvest - resumable harvesting of public GitHub repositories.
//!
//! A CLI tool that enumerates public repositories in ascending-id order,
//! filters them by language, and appends matches to a CSV file that also
//! serves as the resume checkpoint.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = repoharvest_core::load_config().context("Failed to load configuration")?;
    logging::init_logging(cli.output, &config.harvest.error_log);
    debug!("Configuration loaded successfully");

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    // A ctrl-c cancels the token; the fetch loop drains cleanly and the
    // process exits 0 with no stack trace.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupt received, cancelling");
                cancel.cancel();
            }
        });
    }

    match commands::run(cli.command, output_ctx, &config, cancel).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            Err(e)
        }
    }
}
