// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return data; this module handles presentation in text
//! or JSON form.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;
}

/// Generic render function - JSON via serde, text via the trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            result
                .render_text(&mut io::stdout(), ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}

/// Store status report for the `status` command.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Path of the CSV store.
    pub file: PathBuf,
    /// Whether the store file exists.
    pub exists: bool,
    /// Number of records in the store.
    pub records: u64,
    /// Resume checkpoint: maximum stored id, absent for an empty store.
    pub checkpoint: Option<u64>,
}

impl Renderable for StatusReport {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{} {}", style("Store:").bold(), self.file.display())?;
        if !self.exists {
            writeln!(w, "The store does not exist yet.")?;
        }
        writeln!(w, "{} {}", style("Records:").bold(), self.records)?;
        match self.checkpoint {
            Some(id) => writeln!(w, "{} {id}", style("Checkpoint:").bold())?,
            None => writeln!(
                w,
                "{} unset (next run starts from the oldest repository)",
                style("Checkpoint:").bold()
            )?,
        }
        Ok(())
    }
}
