//! Application bootstrap and lifecycle management.
//!
//! `GeoTrackApp` brings the pieces up in order and tears them down again:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       GeoTrackApp                        │
//! │                                                          │
//! │  1. Tokio runtime (location source tasks)                │
//! │  2. LocationService (simulated | gpsd)                   │
//! │  3. Tracker ─► PermissionFlow, LocationStore, MapCanvas  │
//! │  4. launch() ─► permission check or request              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use geotrack::app::{AppConfig, GeoTrackApp};
//!
//! let config = AppConfig::from_config_file(&ConfigFile::load()?);
//! let permissions = config.static_permissions().unwrap();
//! let mut app = GeoTrackApp::start_sync(config, permissions)?;
//!
//! loop {
//!     app.pump();
//!     // render app.tracker().map() and app.tracker().status_card()
//! }
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::GeoTrackApp;
pub use config::AppConfig;
pub use error::AppError;
