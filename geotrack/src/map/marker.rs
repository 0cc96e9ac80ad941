//! Current-location marker.

use tracing::trace;

use super::overlay::{Marker, Overlay, ANCHOR_BOTTOM, ANCHOR_CENTER};
use super::widget::MapWidget;
use crate::coord::Coordinate;

/// Title shown on the location marker.
pub const MARKER_TITLE: &str = "Current Location";

/// Snippet text for a marker at `location`.
pub fn marker_snippet(location: &Coordinate) -> String {
    format!(
        "Lat: {}, Lng: {}",
        snippet_degrees(location.latitude),
        snippet_degrees(location.longitude)
    )
}

/// Shortest round-trip rendering with at least one fractional digit.
///
/// Magnitudes below 1e-3 switch to `<mantissa>E<exponent>`, e.g. `1.0E-5`.
fn snippet_degrees(value: f64) -> String {
    if value == 0.0 || !value.is_finite() || value.abs() >= 1e-3 {
        return format!("{:?}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{}E{}", mantissa, exponent)
        }
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}

/// Replace whatever marker is on the map with one at `location`.
///
/// Other overlays are kept. Afterwards the map holds exactly one marker.
pub fn update_marker<W: MapWidget + ?Sized>(map: &mut W, location: Coordinate) {
    map.overlays_mut().retain(|overlay| !overlay.is_marker());

    let marker = Marker::new(location)
        .with_anchor(ANCHOR_CENTER, ANCHOR_BOTTOM)
        .with_title(MARKER_TITLE)
        .with_snippet(marker_snippet(&location));

    trace!(%location, "Placing location marker");
    map.overlays_mut().push(Overlay::Marker(marker));
    map.invalidate();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapCanvas;

    #[test]
    fn test_single_marker_after_repeated_updates() {
        let mut canvas = MapCanvas::new();
        update_marker(&mut canvas, Coordinate::new(1.0, 1.0));
        update_marker(&mut canvas, Coordinate::new(2.0, 2.0));
        update_marker(&mut canvas, Coordinate::new(3.0, 3.0));

        let markers = canvas.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, Coordinate::new(3.0, 3.0));
        assert_eq!(canvas.redraw_count(), 3);
    }

    #[test]
    fn test_marker_fields() {
        let mut canvas = MapCanvas::new();
        update_marker(&mut canvas, Coordinate::new(37.422, -122.084));

        let marker = canvas.markers()[0].clone();
        assert_eq!(marker.title, "Current Location");
        assert_eq!(marker.snippet, "Lat: 37.422, Lng: -122.084");
        assert_eq!(marker.anchor.horizontal, 0.5);
        assert_eq!(marker.anchor.vertical, 1.0);
    }

    #[test]
    fn test_snippet_keeps_fraction_on_whole_degrees() {
        assert_eq!(
            marker_snippet(&Coordinate::new(10.0, 20.0)),
            "Lat: 10.0, Lng: 20.0"
        );
        assert_eq!(
            marker_snippet(&Coordinate::new(0.0, -0.0)),
            "Lat: 0.0, Lng: -0.0"
        );
    }

    #[test]
    fn test_snippet_small_values_use_exponent() {
        assert_eq!(
            marker_snippet(&Coordinate::new(0.00001, -0.00012345)),
            "Lat: 1.0E-5, Lng: -1.2345E-4"
        );
        assert_eq!(
            marker_snippet(&Coordinate::new(0.001, 14.5995)),
            "Lat: 0.001, Lng: 14.5995"
        );
    }

    #[test]
    fn test_other_overlays_preserved() {
        let mut canvas = MapCanvas::new();
        canvas
            .overlays_mut()
            .push(Overlay::Attribution("credit".to_string()));
        update_marker(&mut canvas, Coordinate::new(0.0, 0.0));

        assert_eq!(canvas.overlays().len(), 2);
        assert!(matches!(canvas.overlays()[0], Overlay::Attribution(_)));
    }
}
