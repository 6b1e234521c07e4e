// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the repoharvest CLI.

pub mod completion;
pub mod fetch;
pub mod status;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use crate::cli::{Commands, OutputContext};
use crate::output;
use repoharvest_core::AppConfig;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Dispatch to the appropriate command handler.
pub async fn run(
    command: Commands,
    ctx: OutputContext,
    config: &AppConfig,
    cancel: CancellationToken,
) -> Result<()> {
    match command {
        Commands::Fetch {
            file,
            language,
            token,
            since,
            once,
            include_forks,
        } => {
            let args = fetch::FetchArgs {
                file,
                language,
                token,
                since,
                once,
                include_forks,
            };
            fetch::run(args, &ctx, config, cancel).await
        }

        Commands::Status { file } => {
            let report = status::run(file, config)?;
            output::render(&report, &ctx)
        }

        Commands::Completion { shell } => completion::run_generate(shell),
    }
}
