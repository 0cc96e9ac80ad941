//! Map widget abstraction.

use super::overlay::{Marker, Overlay};
use super::tile_source::TileSource;
use crate::coord::Coordinate;

/// A map rendering widget.
///
/// Mirrors the controls a slippy-map view exposes: tile source, gesture mode,
/// zoom, center, an overlay list and an explicit redraw request. Lifecycle
/// hooks default to no-ops for widgets that have none.
pub trait MapWidget {
    fn set_tile_source(&mut self, source: TileSource);

    fn tile_source(&self) -> &TileSource;

    /// Enable or disable pinch/multi-touch gestures.
    fn set_multi_touch_controls(&mut self, enabled: bool);

    fn set_zoom(&mut self, zoom: f64);

    fn zoom(&self) -> f64;

    fn set_center(&mut self, center: Coordinate);

    fn center(&self) -> Coordinate;

    fn overlays(&self) -> &[Overlay];

    fn overlays_mut(&mut self) -> &mut Vec<Overlay>;

    /// Request a redraw.
    fn invalidate(&mut self);

    /// Markers currently on the map.
    fn markers(&self) -> Vec<&Marker> {
        self.overlays().iter().filter_map(Overlay::as_marker).collect()
    }

    fn on_pause(&mut self) {}

    fn on_resume(&mut self) {}

    /// Tear the view down. Overlays are released.
    fn on_detach(&mut self) {}
}
