//! Runtime configuration
//!
//! Precedence: command-line flag, then environment (`USERCTL_*`), then a
//! `.env` file in the working directory, then built-in defaults. clap
//! resolves the first three; `dotenvy` only has to run before parsing.

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use userctl_core::errors::{ExError, ExErrorKind};
use userctl_core::logging_facility::Profile;
use userctl_store::SessionOptions;

pub const DEFAULT_DB_PATH: &str = ".userctl/users.db";

/// Log line format on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Flags accepted before or after any subcommand
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Path of the SQLite database file
    #[arg(long, global = true, env = "USERCTL_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Log format on stderr (filter with RUST_LOG)
    #[arg(
        long,
        global = true,
        env = "USERCTL_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Milliseconds to wait for another process's write lock
    #[arg(
        long,
        global = true,
        env = "USERCTL_BUSY_TIMEOUT_MS",
        default_value_t = 5000
    )]
    pub busy_timeout_ms: u64,
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_format: LogFormat,
    pub busy_timeout: Duration,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            database_path: args.db.clone(),
            log_format: args.log_format,
            busy_timeout: Duration::from_millis(args.busy_timeout_ms),
        }
    }

    pub fn log_profile(&self) -> Profile {
        match self.log_format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            busy_timeout: self.busy_timeout,
        }
    }

    /// Create the database file's parent directory if it is missing
    pub fn ensure_database_dir(&self) -> Result<(), ExError> {
        match self.database_path.parent() {
            Some(dir) if dir != Path::new("") => std::fs::create_dir_all(dir).map_err(|e| {
                ExError::new(ExErrorKind::Io, e.to_string())
                    .in_op("create_database_dir")
                    .for_entity(dir.display().to_string())
            }),
            _ => Ok(()),
        }
    }
}
