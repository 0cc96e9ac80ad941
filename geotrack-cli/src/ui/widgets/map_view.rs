//! Map view widget.
//!
//! Draws the viewport of a [`MapCanvas`] on a braille canvas: coastlines,
//! the tile grid at the current zoom and the location marker.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Line, Map, MapResolution},
        Block, Borders, Widget,
    },
};

use geotrack::coord::{tile_to_lat_lon, to_tile_coords, Coordinate, TileCoord};
use geotrack::map::{Lifecycle, MapCanvas, MapWidget, ViewportBounds};

/// Approximate pixel size of one terminal cell.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Grid lines are skipped when more than this many would be drawn.
const MAX_GRID_LINES: usize = 48;

const MARKER_SYMBOL: &str = "▼";

pub struct MapViewWidget<'a> {
    map: &'a MapCanvas,
}

impl<'a> MapViewWidget<'a> {
    pub fn new(map: &'a MapCanvas) -> Self {
        Self { map }
    }

    /// Geographic area shown in a widget of `area`'s size.
    pub fn bounds_for(&self, area: Rect) -> ViewportBounds {
        self.map.visible_bounds(
            area.width as f64 * CELL_WIDTH_PX,
            area.height as f64 * CELL_HEIGHT_PX,
        )
    }

    fn border_color(&self) -> Color {
        match self.map.lifecycle() {
            Lifecycle::Active => Color::Cyan,
            Lifecycle::Paused => Color::DarkGray,
            Lifecycle::Detached => Color::Red,
        }
    }
}

/// Longitudes and latitudes of tile edges inside `bounds` at `zoom`.
///
/// Returns empty lists when the grid would be too dense to read.
pub fn tile_grid(bounds: &ViewportBounds, zoom: u8) -> (Vec<f64>, Vec<f64>) {
    let north = Coordinate::new(bounds.north, bounds.west).mercator_latitude();
    let south = Coordinate::new(bounds.south, bounds.east).mercator_latitude();
    let (Ok(north_west), Ok(south_east)) = (
        to_tile_coords(north, bounds.west, zoom),
        to_tile_coords(south, bounds.east, zoom),
    ) else {
        return (Vec::new(), Vec::new());
    };

    let cols = north_west.col..=south_east.col.saturating_add(1);
    let rows = north_west.row..=south_east.row.saturating_add(1);
    if cols.clone().count() > MAX_GRID_LINES || rows.clone().count() > MAX_GRID_LINES {
        return (Vec::new(), Vec::new());
    }

    let edge = |row, col| tile_to_lat_lon(&TileCoord { row, col, zoom });
    let lons = cols
        .map(|col| edge(north_west.row, col).1)
        .filter(|lon| (bounds.west..=bounds.east).contains(lon))
        .collect();
    let lats = rows
        .map(|row| edge(row, north_west.col).0)
        .filter(|lat| (bounds.south..=bounds.north).contains(lat))
        .collect();
    (lons, lats)
}

impl Widget for MapViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()))
            .title_bottom(TextLine::from(Span::styled(
                format!(" {} ", self.map.tile_source().attribution()),
                Style::default().fg(Color::DarkGray),
            )));

        let inner = block.inner(area);
        let bounds = self.bounds_for(inner);
        let zoom = self.map.zoom().floor() as u8;
        let (grid_lons, grid_lats) = tile_grid(&bounds, zoom);
        let markers: Vec<_> = self.map.markers().into_iter().cloned().collect();

        Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([bounds.west, bounds.east])
            .y_bounds([bounds.south, bounds.north])
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::Green,
                });
                for lon in &grid_lons {
                    ctx.draw(&Line {
                        x1: *lon,
                        y1: bounds.south,
                        x2: *lon,
                        y2: bounds.north,
                        color: Color::DarkGray,
                    });
                }
                for lat in &grid_lats {
                    ctx.draw(&Line {
                        x1: bounds.west,
                        y1: *lat,
                        x2: bounds.east,
                        y2: *lat,
                        color: Color::DarkGray,
                    });
                }

                ctx.layer();
                for marker in &markers {
                    let position = marker.position;
                    ctx.print(
                        position.longitude,
                        position.latitude,
                        TextLine::from(vec![
                            Span::styled(
                                MARKER_SYMBOL,
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!(" {}", marker.title),
                                Style::default().fg(Color::White),
                            ),
                        ]),
                    );
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack::map::update_marker;

    fn canvas_at(center: Coordinate, zoom: f64) -> MapCanvas {
        let mut map = MapCanvas::new();
        map.set_zoom(zoom);
        map.set_center(center);
        map
    }

    #[test]
    fn test_bounds_follow_area() {
        let map = canvas_at(Coordinate::new(14.5995, 120.9842), 15.0);
        let widget = MapViewWidget::new(&map);

        let small = widget.bounds_for(Rect::new(0, 0, 40, 10));
        let large = widget.bounds_for(Rect::new(0, 0, 80, 20));
        assert!(large.east - large.west > small.east - small.west);
        assert!(small.contains(&map.center()));
    }

    #[test]
    fn test_tile_grid_lines_inside_bounds() {
        let map = canvas_at(Coordinate::new(14.5995, 120.9842), 15.0);
        let bounds = MapViewWidget::new(&map).bounds_for(Rect::new(0, 0, 100, 30));
        let (lons, lats) = tile_grid(&bounds, 15);

        assert!(!lons.is_empty());
        assert!(!lats.is_empty());
        assert!(lons.iter().all(|lon| *lon >= bounds.west && *lon <= bounds.east));
        assert!(lats.iter().all(|lat| *lat >= bounds.south && *lat <= bounds.north));
    }

    #[test]
    fn test_dense_grid_is_dropped() {
        let bounds = ViewportBounds {
            south: -60.0,
            west: -170.0,
            north: 60.0,
            east: 170.0,
        };
        assert_eq!(tile_grid(&bounds, 12), (Vec::new(), Vec::new()));
    }

    #[test]
    fn test_render_draws_marker() {
        let mut map = canvas_at(Coordinate::new(14.5995, 120.9842), 15.0);
        update_marker(&mut map, Coordinate::new(14.5995, 120.9842));

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        MapViewWidget::new(&map).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains(MARKER_SYMBOL));
        assert!(text.contains("OpenStreetMap"));
    }
}
