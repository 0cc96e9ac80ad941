//! Map overlays.

use crate::coord::Coordinate;

/// Horizontal anchor at the icon's center.
pub const ANCHOR_CENTER: f32 = 0.5;

/// Vertical anchor at the icon's bottom edge.
pub const ANCHOR_BOTTOM: f32 = 1.0;

/// Point of the marker icon that sits on the coordinate, as fractions of the
/// icon's width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Anchor {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::new(ANCHOR_CENTER, ANCHOR_BOTTOM)
    }
}

/// A pin on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub anchor: Anchor,
    pub title: String,
    pub snippet: String,
}

impl Marker {
    pub fn new(position: Coordinate) -> Self {
        Self {
            position,
            anchor: Anchor::default(),
            title: String::new(),
            snippet: String::new(),
        }
    }

    pub fn with_anchor(mut self, horizontal: f32, vertical: f32) -> Self {
        self.anchor = Anchor::new(horizontal, vertical);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }
}

/// Anything drawn on top of the tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(Marker),
    /// Tile credit text.
    Attribution(String),
}

impl Overlay {
    pub fn is_marker(&self) -> bool {
        matches!(self, Overlay::Marker(_))
    }

    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Overlay::Marker(marker) => Some(marker),
            _ => None,
        }
    }
}
