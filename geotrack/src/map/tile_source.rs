//! Map tile sources.

use std::fmt;
use std::str::FromStr;

use crate::coord::TileCoord;

/// Where map tiles come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    name: &'static str,
    url_template: &'static str,
    min_zoom: u8,
    max_zoom: u8,
    attribution: &'static str,
}

impl TileSource {
    /// OpenStreetMap standard street tiles.
    pub fn mapnik() -> Self {
        Self {
            name: "Mapnik",
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            min_zoom: 0,
            max_zoom: 19,
            attribution: "© OpenStreetMap contributors",
        }
    }

    /// OpenTopoMap topographic tiles.
    pub fn open_topo() -> Self {
        Self {
            name: "OpenTopo",
            url_template: "https://tile.opentopomap.org/{z}/{x}/{y}.png",
            min_zoom: 0,
            max_zoom: 17,
            attribution: "© OpenStreetMap contributors, SRTM | © OpenTopoMap (CC-BY-SA)",
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    pub fn attribution(&self) -> &'static str {
        self.attribution
    }

    /// URL of the given tile.
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        self.url_template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.col.to_string())
            .replace("{y}", &tile.row.to_string())
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::mapnik()
    }
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for TileSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mapnik" | "osm" => Ok(Self::mapnik()),
            "opentopo" | "topo" => Ok(Self::open_topo()),
            other => Err(format!(
                "unknown tile source '{}' (expected mapnik or opentopo)",
                other
            )),
        }
    }
}
