//! In-memory map widget.
//!
//! `MapCanvas` keeps the viewport, overlays and lifecycle of a map view
//! without drawing anything itself. Front ends read it to render (the CLI
//! draws it on a terminal canvas).

use tracing::debug;

use super::overlay::Overlay;
use super::tile_source::TileSource;
use super::widget::MapWidget;
use crate::coord::{
    from_world_pixels, to_tile_coords, to_world_pixels, CoordError, Coordinate, TileCoord,
    TILE_SIZE_PX,
};

/// Lifecycle of the view, following the owning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Paused,
    Detached,
}

/// Geographic rectangle covered by the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl ViewportBounds {
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.south..=self.north).contains(&coord.latitude)
            && (self.west..=self.east).contains(&coord.longitude)
    }
}

/// Map widget state.
#[derive(Debug, Clone)]
pub struct MapCanvas {
    tile_source: TileSource,
    multi_touch: bool,
    zoom: f64,
    center: Coordinate,
    overlays: Vec<Overlay>,
    lifecycle: Lifecycle,
    redraws: u64,
    redraw_pending: bool,
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MapCanvas {
    pub fn new() -> Self {
        Self {
            tile_source: TileSource::default(),
            multi_touch: false,
            zoom: 2.0,
            center: Coordinate::new(0.0, 0.0),
            overlays: Vec::new(),
            lifecycle: Lifecycle::Active,
            redraws: 0,
            redraw_pending: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Number of redraws performed.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn multi_touch_enabled(&self) -> bool {
        self.multi_touch
    }

    /// Zoom gesture. Ignored unless multi-touch controls are enabled.
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        if !self.multi_touch || self.lifecycle != Lifecycle::Active {
            return false;
        }
        let before = self.zoom;
        self.set_zoom(self.zoom + delta);
        if self.zoom != before {
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Tile under the viewport center at the current integer zoom.
    pub fn center_tile(&self) -> Result<TileCoord, CoordError> {
        let zoom = self.zoom.floor() as u8;
        to_tile_coords(
            self.center.mercator_latitude(),
            self.center.longitude,
            zoom,
        )
    }

    /// URL of the tile under the viewport center.
    pub fn center_tile_url(&self) -> Option<String> {
        self.center_tile()
            .ok()
            .map(|tile| self.tile_source.tile_url(&tile))
    }

    /// Area visible in a viewport of `width_px` by `height_px`.
    pub fn visible_bounds(&self, width_px: f64, height_px: f64) -> ViewportBounds {
        let (cx, cy) = to_world_pixels(&self.center, self.zoom);
        let world = TILE_SIZE_PX * 2.0_f64.powf(self.zoom);
        let half_w = width_px / 2.0;
        let half_h = height_px / 2.0;

        let north_west = from_world_pixels(cx - half_w, (cy - half_h).max(0.0), self.zoom);
        let south_east = from_world_pixels(cx + half_w, (cy + half_h).min(world), self.zoom);

        ViewportBounds {
            south: south_east.latitude,
            west: north_west.longitude.max(-180.0),
            north: north_west.latitude,
            east: south_east.longitude.min(180.0),
        }
    }
}

impl MapWidget for MapCanvas {
    fn set_tile_source(&mut self, source: TileSource) {
        self.tile_source = source;
        self.set_zoom(self.zoom);
    }

    fn tile_source(&self) -> &TileSource {
        &self.tile_source
    }

    fn set_multi_touch_controls(&mut self, enabled: bool) {
        self.multi_touch = enabled;
    }

    fn set_zoom(&mut self, zoom: f64) {
        let min = self.tile_source.min_zoom() as f64;
        let max = self.tile_source.max_zoom() as f64;
        self.zoom = zoom.clamp(min, max);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    fn overlays_mut(&mut self) -> &mut Vec<Overlay> {
        &mut self.overlays
    }

    fn invalidate(&mut self) {
        match self.lifecycle {
            Lifecycle::Active => self.redraws += 1,
            Lifecycle::Paused => self.redraw_pending = true,
            Lifecycle::Detached => {}
        }
    }

    fn on_pause(&mut self) {
        if self.lifecycle == Lifecycle::Active {
            debug!("Map view paused");
            self.lifecycle = Lifecycle::Paused;
        }
    }

    fn on_resume(&mut self) {
        if self.lifecycle == Lifecycle::Paused {
            debug!("Map view resumed");
            self.lifecycle = Lifecycle::Active;
            if std::mem::take(&mut self.redraw_pending) {
                self.redraws += 1;
            }
        }
    }

    fn on_detach(&mut self) {
        debug!("Map view detached");
        self.overlays.clear();
        self.redraw_pending = false;
        self.lifecycle = Lifecycle::Detached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped_to_tile_source() {
        let mut canvas = MapCanvas::new();
        canvas.set_zoom(25.0);
        assert_eq!(canvas.zoom(), 19.0);

        canvas.set_tile_source(TileSource::open_topo());
        assert_eq!(canvas.zoom(), 17.0);
    }

    #[test]
    fn test_zoom_gesture_requires_multi_touch() {
        let mut canvas = MapCanvas::new();
        canvas.set_zoom(10.0);
        assert!(!canvas.zoom_by(1.0));

        canvas.set_multi_touch_controls(true);
        assert!(canvas.zoom_by(1.0));
        assert_eq!(canvas.zoom(), 11.0);
        assert_eq!(canvas.redraw_count(), 1);
    }

    #[test]
    fn test_paused_redraw_is_deferred() {
        let mut canvas = MapCanvas::new();
        canvas.on_pause();
        canvas.invalidate();
        assert_eq!(canvas.redraw_count(), 0);

        canvas.on_resume();
        assert_eq!(canvas.redraw_count(), 1);
        assert_eq!(canvas.lifecycle(), Lifecycle::Active);
    }

    #[test]
    fn test_detach_releases_overlays() {
        let mut canvas = MapCanvas::new();
        canvas
            .overlays_mut()
            .push(Overlay::Attribution("credit".to_string()));
        canvas.on_detach();

        assert!(canvas.overlays().is_empty());
        assert_eq!(canvas.lifecycle(), Lifecycle::Detached);
        canvas.invalidate();
        assert_eq!(canvas.redraw_count(), 0);
    }

    #[test]
    fn test_visible_bounds_contain_center() {
        let mut canvas = MapCanvas::new();
        canvas.set_zoom(15.0);
        canvas.set_center(Coordinate::new(14.5995, 120.9842));

        let bounds = canvas.visible_bounds(800.0, 600.0);
        assert!(bounds.contains(&canvas.center()));
        assert!(bounds.north > bounds.south);
        assert!(bounds.east > bounds.west);
        // 800px at zoom 15 is a few kilometres wide
        assert!(bounds.east - bounds.west < 0.05);
    }

    #[test]
    fn test_center_tile_url() {
        let mut canvas = MapCanvas::new();
        canvas.set_zoom(0.0);
        assert_eq!(
            canvas.center_tile_url().unwrap(),
            "https://tile.openstreetmap.org/0/0/0.png"
        );
    }
}
