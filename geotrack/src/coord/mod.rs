//! Coordinate types and map projection helpers.
//!
//! Provides the [`Coordinate`] value published by location sources and
//! conversions between geographic coordinates and Web Mercator tiles, which the
//! map view uses to name the tile under its center and to size its viewport.

mod types;

pub use types::{
    CoordError, Coordinate, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Where the map centers before any location has been published.
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(14.5995, 120.9842);

/// Side length of a rendered map tile in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 19)
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n as u32 - 1;

    // lon == 180.0 lands one past the last column
    let col = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    let lat_rad = lat * PI / 180.0;
    let row = (((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32).min(max_index);

    Ok(TileCoord { row, col, zoom })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.col as f64 / n * 360.0 - 180.0;

    let y = tile.row as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

/// Projects a coordinate to fractional world pixel coordinates at `zoom`.
///
/// Fractional zoom levels are supported, matching map widgets that zoom
/// smoothly between tile levels.
pub fn to_world_pixels(coord: &Coordinate, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE_PX * 2.0_f64.powf(zoom);
    let x = (coord.longitude + 180.0) / 360.0 * scale;
    let lat_rad = coord.mercator_latitude().to_radians();
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * scale;
    (x, y)
}

/// Inverse of [`to_world_pixels`].
pub fn from_world_pixels(x: f64, y: f64, zoom: f64) -> Coordinate {
    let scale = TILE_SIZE_PX * 2.0_f64.powf(zoom);
    let lon = x / scale * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / scale)).sinh().atan().to_degrees();
    Coordinate::new(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_city_at_zoom_16() {
        // New York City: 40.7128°N, 74.0060°W
        let tile = to_tile_coords(40.7128, -74.0060, 16).unwrap();
        assert_eq!(tile.row, 24640);
        assert_eq!(tile.col, 19295);
        assert_eq!(tile.zoom, 16);
    }

    #[test]
    fn test_fallback_location_tile() {
        let tile = to_tile_coords(
            FALLBACK_LOCATION.latitude,
            FALLBACK_LOCATION.longitude,
            15,
        )
        .unwrap();
        let (lat, lon) = tile_to_lat_lon(&tile);
        assert!((lat - 14.5995).abs() < 0.02);
        assert!((lon - 120.9842).abs() < 0.02);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = to_tile_coords(90.0, 0.0, 10);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_invalid_zoom() {
        let result = to_tile_coords(0.0, 0.0, 20);
        assert!(matches!(result, Err(CoordError::InvalidZoom(20))));
    }

    #[test]
    fn test_antimeridian_clamped_to_last_column() {
        let tile = to_tile_coords(0.0, 180.0, 3).unwrap();
        assert_eq!(tile.col, 7);
    }

    #[test]
    fn test_checked_coordinate() {
        assert!(Coordinate::checked(37.422, -122.084).is_ok());
        assert_eq!(
            Coordinate::checked(91.0, 0.0),
            Err(CoordError::InvalidLatitude(91.0))
        );
        assert!(matches!(
            Coordinate::checked(0.0, f64::NAN),
            Err(CoordError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn test_display_uses_six_decimals() {
        let coord = Coordinate::new(37.422, -122.084);
        assert_eq!(coord.to_string(), "37.422000, -122.084000");
    }

    #[test]
    fn test_tile_display_is_url_order() {
        let tile = TileCoord {
            row: 3,
            col: 5,
            zoom: 4,
        };
        assert_eq!(tile.to_string(), "4/5/3");
    }

    #[test]
    fn test_world_pixels_origin_at_zoom_zero() {
        let (x, y) = to_world_pixels(&Coordinate::new(0.0, 0.0), 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_property(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let tile = to_tile_coords(lat, lon, zoom)?;
                let (converted_lat, converted_lon) = tile_to_lat_lon(&tile);

                let tile_size = 360.0 / (2.0_f64.powi(zoom as i32));

                prop_assert!((converted_lat - lat).abs() < tile_size);
                prop_assert!((converted_lon - lon).abs() < tile_size);
            }

            #[test]
            fn test_tile_coords_in_bounds(
                lat in -85.05..85.05_f64,
                lon in -180.0..=180.0_f64,
                zoom in 0u8..=19
            ) {
                let tile = to_tile_coords(lat, lon, zoom)?;
                let max_tile = 2u32.pow(zoom as u32);
                prop_assert!(tile.row < max_tile);
                prop_assert!(tile.col < max_tile);
                prop_assert_eq!(tile.zoom, zoom);
            }

            #[test]
            fn test_world_pixels_roundtrip(
                lat in -85.0..85.0_f64,
                lon in -179.9..179.9_f64,
                zoom in 0.0..19.0_f64
            ) {
                let coord = Coordinate::new(lat, lon);
                let (x, y) = to_world_pixels(&coord, zoom);
                let back = from_world_pixels(x, y, zoom);
                prop_assert!((back.latitude - lat).abs() < 1e-6);
                prop_assert!((back.longitude - lon).abs() < 1e-6);
            }
        }
    }
}
