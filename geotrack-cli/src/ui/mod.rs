//! Terminal UI for geotrack.
//!
//! Draws the map with the location marker and the floating status card.
//!
//! # Module Structure
//!
//! - `dashboard` - terminal setup, input handling and frame layout
//! - `widgets` - map view and status card widgets

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardEvent, ScreenSnapshot};
