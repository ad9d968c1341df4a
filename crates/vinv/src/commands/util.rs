//! Shared helpers for command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use vinv_core::SourceConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;

/// Load the config file and resolve the data source and output format.
pub fn resolve(global: &GlobalOpts) -> Result<(SourceConfig, OutputFormat), CliError> {
    let cfg = config::load_config()?;
    let source = config::resolve_source(global, &cfg)?;
    tracing::debug!(source = %source.describe(), "resolved data source");
    Ok((source, config::output_format(global, &cfg)))
}

/// Stderr spinner shown while a source is queried. Hidden in quiet mode and
/// when stderr is not a terminal.
pub fn spinner(message: String, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
