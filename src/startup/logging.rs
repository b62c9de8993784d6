//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to
//! `<data dir>/feedline/feedline.log` instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::{eyre::WrapErr, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "FEEDLINE_LOG";
const DEFAULT_FILTER: &str = "feedline=info";
const LOG_FILE_NAME: &str = "feedline.log";

/// Directory for the log file, falling back to the working directory.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("feedline"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Open (creating if needed) the log file in `dir` for appending.
pub fn open_log_file(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))
}

/// Install the global subscriber writing to a log file in `dir`.
///
/// Returns the log file path. Installing twice keeps the first subscriber.
pub fn init_logging(dir: &Path) -> Result<PathBuf> {
    let file = Arc::new(open_log_file(dir)?);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(file)
        .try_init();

    Ok(dir.join(LOG_FILE_NAME))
}
