//! CLI error type.

use thiserror::Error;

use geotrack::app::AppError;
use geotrack::config::ConfigError;
use geotrack::logging::LoggingError;

/// Errors surfaced to the user. Any of these exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
