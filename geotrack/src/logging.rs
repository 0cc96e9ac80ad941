//! File logging.
//!
//! Logs go to a daily-rolling file so that the terminal UI is left alone.
//! `RUST_LOG` overrides the configured level.

use std::path::{Path, PathBuf};

use thiserror::Error;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::time::LocalTime, prelude::*, EnvFilter};

/// Base name of the log file; the appender adds a date suffix.
pub const LOG_FILE_NAME: &str = "geotrack.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("A global logger is already installed")]
    AlreadyInstalled,
}

/// Default filter directive for a level name.
pub fn default_filter(level: &str) -> String {
    format!("geotrack={level},geotrack_cli={level}")
}

/// Install the global subscriber writing to `directory`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background writer.
pub fn init_logging(directory: &Path, level: &str) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::CreateDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let filter = build_filter(level)?;

    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_timer(timer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    tracing::info!(
        directory = %directory.display(),
        version = crate::VERSION,
        "Logging initialized"
    );
    Ok(guard)
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = default_filter(level);
    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_both_crates() {
        assert_eq!(
            default_filter("debug"),
            "geotrack=debug,geotrack_cli=debug"
        );
    }

    #[test]
    fn test_filter_builds_for_known_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(default_filter(level)).is_ok());
        }
    }
}
