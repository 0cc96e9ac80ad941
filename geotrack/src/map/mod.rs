//! Map view.
//!
//! # Architecture
//!
//! ```text
//! Tracker ──► MapViewAdapter ──► MapWidget (trait) ◄── MapCanvas (in-memory)
//!                  │                                        ▲
//!                  └──► update_marker                       └── CLI renders it
//! ```
//!
//! The adapter configures the widget once (tile source, gestures, zoom,
//! initial center) and afterwards only recenters it and replaces the marker.

mod adapter;
mod canvas;
mod marker;
mod overlay;
mod tile_source;
mod widget;

pub use adapter::{MapViewAdapter, MapViewConfig, DEFAULT_ZOOM};
pub use canvas::{Lifecycle, MapCanvas, ViewportBounds};
pub use marker::{marker_snippet, update_marker, MARKER_TITLE};
pub use overlay::{Anchor, Marker, Overlay, ANCHOR_BOTTOM, ANCHOR_CENTER};
pub use tile_source::TileSource;
pub use widget::MapWidget;
