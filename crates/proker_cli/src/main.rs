//! `proker` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and dispatch one user event.
//! - Render results as plain text.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::CliConfig::resolve(&cli.global)?;

    if let Some(log_dir) = &config.log_dir {
        proker_core::init_logging(&config.log_level, &log_dir.to_string_lossy())
            .map_err(anyhow::Error::msg)?;
    }

    cli.execute(&config)
}
