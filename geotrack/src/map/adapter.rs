//! Map view adapter.
//!
//! Configures a [`MapWidget`] for location display and is the one place that
//! moves the viewport and the marker when a new coordinate is published.

use tracing::{debug, info};

use super::marker::update_marker;
use super::overlay::Overlay;
use super::tile_source::TileSource;
use super::widget::MapWidget;
use crate::coord::{Coordinate, FALLBACK_LOCATION};

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 15.0;

/// How the map view is set up on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewConfig {
    pub tile_source: TileSource,
    pub zoom: f64,
    pub multi_touch: bool,
    /// Center used until a location is known.
    pub fallback: Coordinate,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            tile_source: TileSource::mapnik(),
            zoom: DEFAULT_ZOOM,
            multi_touch: true,
            fallback: FALLBACK_LOCATION,
        }
    }
}

/// Owns the map widget for a screen.
#[derive(Debug)]
pub struct MapViewAdapter<W: MapWidget> {
    widget: W,
    updates: u64,
}

impl<W: MapWidget> MapViewAdapter<W> {
    /// Set up `widget` and center it on `last_known`, or the fallback.
    ///
    /// When a location is already known its marker is placed right away.
    pub fn create(mut widget: W, config: &MapViewConfig, last_known: Option<Coordinate>) -> Self {
        widget.set_tile_source(config.tile_source.clone());
        widget.set_multi_touch_controls(config.multi_touch);
        widget.set_zoom(config.zoom);
        widget
            .overlays_mut()
            .push(Overlay::Attribution(config.tile_source.attribution().to_string()));

        let center = last_known.unwrap_or(config.fallback);
        widget.set_center(center);

        info!(
            tile_source = %config.tile_source,
            zoom = config.zoom,
            %center,
            fallback = last_known.is_none(),
            "Map view created"
        );

        let mut adapter = Self { widget, updates: 0 };
        if let Some(location) = last_known {
            adapter.show_location(location);
        }
        adapter
    }

    /// Recenter on `location` and move the marker there.
    pub fn show_location(&mut self, location: Coordinate) {
        debug!(%location, "Recentering map");
        self.widget.set_center(location);
        update_marker(&mut self.widget, location);
        self.updates += 1;
    }

    /// Number of recenter + marker updates applied.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn pause(&mut self) {
        self.widget.on_pause();
    }

    pub fn resume(&mut self) {
        self.widget.on_resume();
    }

    pub fn detach(&mut self) {
        self.widget.on_detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapCanvas;

    #[test]
    fn test_create_without_location_uses_fallback() {
        let adapter =
            MapViewAdapter::create(MapCanvas::new(), &MapViewConfig::default(), None);
        let map = adapter.widget();

        assert_eq!(map.center(), Coordinate::new(14.5995, 120.9842));
        assert_eq!(map.zoom(), 15.0);
        assert!(map.multi_touch_enabled());
        assert_eq!(map.tile_source(), &TileSource::mapnik());
        assert!(map.markers().is_empty());
        assert_eq!(adapter.update_count(), 0);
    }

    #[test]
    fn test_create_with_last_known_centers_and_marks() {
        let known = Coordinate::new(48.8566, 2.3522);
        let adapter =
            MapViewAdapter::create(MapCanvas::new(), &MapViewConfig::default(), Some(known));

        assert_eq!(adapter.widget().center(), known);
        assert_eq!(adapter.widget().markers().len(), 1);
    }

    #[test]
    fn test_show_location_recenters_and_replaces_marker() {
        let mut adapter =
            MapViewAdapter::create(MapCanvas::new(), &MapViewConfig::default(), None);

        adapter.show_location(Coordinate::new(1.0, 2.0));
        adapter.show_location(Coordinate::new(3.0, 4.0));

        let map = adapter.widget();
        assert_eq!(map.center(), Coordinate::new(3.0, 4.0));
        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.markers()[0].position, Coordinate::new(3.0, 4.0));
        // Attribution survives marker replacement
        assert_eq!(map.overlays().len(), 2);
        assert_eq!(adapter.update_count(), 2);
    }
}
