//! Runtime configuration from flags and environment.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "proker.sqlite3";

/// Global options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite file holding the program storage slot
    #[arg(long, global = true, env = "PROKER_DATA")]
    pub data: Option<PathBuf>,

    /// Directory for rotating log files; logging is off when unset
    #[arg(long, global = true, env = "PROKER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PROKER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Storage quota in bytes; 0 disables the limit
    #[arg(long, global = true, env = "PROKER_QUOTA_BYTES")]
    pub quota_bytes: Option<usize>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_path: PathBuf,
    /// Always absolute when set.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub quota_bytes: Option<usize>,
}

impl CliConfig {
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;

        let data_path = args
            .data
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_DATA_FILE));

        let log_dir = args.log_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                cwd.join(dir)
            }
        });

        let log_level = args
            .log_level
            .clone()
            .unwrap_or_else(|| proker_core::default_log_level().to_string());

        let quota_bytes = match args.quota_bytes {
            Some(0) => None,
            Some(limit) => Some(limit),
            None => Some(proker_core::storage::DEFAULT_QUOTA_BYTES),
        };

        Ok(Self {
            data_path,
            log_dir,
            log_level,
            quota_bytes,
        })
    }
}
