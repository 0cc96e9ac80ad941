//! Location callback payloads and errors.

use thiserror::Error;

use crate::coord::Coordinate;

/// Payload of one location callback.
///
/// `last_location` is `None` when the source fired without a usable fix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationResult {
    pub last_location: Option<Coordinate>,
}

impl LocationResult {
    /// A callback carrying a fix.
    pub fn fix(coordinate: Coordinate) -> Self {
        Self {
            last_location: Some(coordinate),
        }
    }

    /// A callback without a fix.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Errors raised when subscribing to a location source.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The request parameters are unusable.
    #[error("Invalid location request: {0}")]
    InvalidRequest(String),

    /// I/O failure talking to the source.
    #[error("Location source I/O error: {0}")]
    Io(#[from] std::io::Error),
}
