//! Tracing setup.
//!
//! Every invocation logs to a daily-rotated file under the logs directory.
//! With `--verbose` the same events are also written to stderr.

use std::path::Path;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::error::BigTimerError;

const LOG_PREFIX: &str = "bigtimer";

/// Install the global subscriber.
///
/// `level` applies to this crate only. `RUST_LOG`, when set, takes precedence.
///
/// # Errors
///
/// Returns `Config` if the log directory cannot be used, the level does not
/// parse, or a subscriber is already installed.
pub fn enable_logging(
    log_dir: &Path,
    level: &str,
    max_files: usize,
    show_stderr: bool,
) -> Result<(), BigTimerError> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(max_files.max(1))
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| BigTimerError::Config(format!("Cannot open log directory: {e}")))?;

    let stderr = std::io::stderr.with_filter(move |_| show_stderr);

    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    let filter = EnvFilter::try_new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
    ))
    .map_err(|e| BigTimerError::Config(format!("Invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .map_err(|e| BigTimerError::Config(format!("Logging already initialized: {e}")))
}
