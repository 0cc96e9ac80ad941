//! Status card content.
//!
//! The card floats over the map and shows either the published coordinate or
//! a waiting message. Front ends only lay the lines out.

use crate::coord::Coordinate;

/// Card heading.
pub const STATUS_TITLE: &str = "GPS Location Tracker";

/// Shown until a coordinate is published.
pub const WAITING_TEXT: &str = "Waiting for location...";

/// Text of the status card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCard {
    pub title: &'static str,
    pub lines: Vec<String>,
}

impl StatusCard {
    /// Card for the published location state.
    pub fn from_location(location: Option<Coordinate>) -> Self {
        Self::from_components(
            location.map(|c| c.latitude),
            location.map(|c| c.longitude),
        )
    }

    /// Card for separately published components; coordinates are shown only
    /// when both are present.
    pub fn from_components(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let lines = match (latitude, longitude) {
            (Some(lat), Some(lon)) => vec![format_latitude(lat), format_longitude(lon)],
            _ => vec![WAITING_TEXT.to_string()],
        };
        Self {
            title: STATUS_TITLE,
            lines,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == WAITING_TEXT
    }
}

pub fn format_latitude(latitude: f64) -> String {
    format!("Latitude: {:.6}", latitude)
}

pub fn format_longitude(longitude: f64) -> String {
    format!("Longitude: {:.6}", longitude)
}
