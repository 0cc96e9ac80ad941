//! Application error types.

use thiserror::Error;

use crate::location::LocationError;

/// Errors that can occur while starting the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The configured location request is unusable.
    #[error("Invalid location request: {0}")]
    InvalidRequest(#[from] LocationError),

    /// Failed to create the Tokio runtime.
    #[error("Failed to create Tokio runtime: {0}")]
    RuntimeCreation(String),
}
