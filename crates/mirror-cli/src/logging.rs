//! Logging setup: every record goes to the console and to an append-only
//! log file, in the same `<timestamp> <LEVEL> <message>` shape.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Keeps the log file open for the life of the process and syncs it to
/// disk on drop.
#[must_use = "dropping the guard flushes and detaches the log file"]
pub struct LoggingGuard {
    file: Arc<File>,
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        let _ = self.file.sync_all();
    }
}

/// Install the global subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset. The log file's parent
/// directories are created as needed and the file is opened for append.
pub fn init(log_file: &Path, default_level: &str) -> Result<LoggingGuard> {
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = Arc::new(
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?,
    );

    let console_layer = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_writer(file.clone());

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))?;

    Ok(LoggingGuard { file })
}
