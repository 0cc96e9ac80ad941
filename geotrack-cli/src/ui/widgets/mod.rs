//! Widgets for the map screen.

mod map_view;
mod status_card;

pub use map_view::{tile_grid, MapViewWidget, CELL_HEIGHT_PX, CELL_WIDTH_PX};
pub use status_card::StatusCardWidget;
