//! geotrack - live GPS position on a map
//!
//! This library holds everything needed to show the device's position on a
//! street map: the location permission flow, location sources, the published
//! location state, the map view with its marker and the status card text.
//! Front ends (see `geotrack-cli`) only render what the [`tracker::Tracker`]
//! exposes.
//!
//! # Modules
//!
//! - [`permission`] - permission check, request and outcome
//! - [`location`] - location requests, subscriptions, simulated and gpsd sources
//! - [`store`] - process-wide published coordinate
//! - [`map`] - map widget abstraction, view adapter and marker updates
//! - [`status`] - status card text
//! - [`tracker`] - the screen controller tying it all together
//! - [`app`] - runtime bootstrap for front ends
//! - [`config`] - INI configuration file
//! - [`logging`] - rolling file logs

pub mod app;
pub mod config;
pub mod coord;
pub mod event;
pub mod location;
pub mod logging;
pub mod map;
pub mod permission;
pub mod status;
pub mod store;
pub mod tracker;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
