//! Location subscription.
//!
//! A [`LocationService`] produces periodic readings for a
//! [`LocationRequest`] and posts them to the application event channel until
//! its [`LocationSubscription`] is unsubscribed.
//!
//! # Sources
//!
//! - [`SimulatedLocationService`] - deterministic walk, no hardware needed
//! - [`GpsdLocationService`] - TPV reports from a gpsd daemon
//!
//! Both honour the request's minimum interval through [`IntervalGate`].
//!
//! # Example
//!
//! ```ignore
//! use geotrack::event::event_channel;
//! use geotrack::location::{LocationRequest, LocationService, SimulatedLocationService};
//!
//! let (tx, mut rx) = event_channel();
//! let service = SimulatedLocationService::new(handle, Default::default());
//! let subscription = service.subscribe(&LocationRequest::default(), tx)?;
//!
//! // ... drain rx on the UI loop ...
//!
//! subscription.unsubscribe();
//! ```

mod gate;
mod gpsd;
mod request;
mod service;
mod simulated;
mod subscription;
mod types;

pub use gate::IntervalGate;
pub use gpsd::{parse_report, GpsdLocationService, DEFAULT_GPSD_HOST, DEFAULT_GPSD_PORT};
pub use request::{LocationRequest, Priority, DEFAULT_INTERVAL, DEFAULT_MIN_UPDATE_INTERVAL};
pub use service::{deliver, LocationService};
pub use simulated::{SimulatedConfig, SimulatedLocationService, SimulatedWalk};
pub use subscription::LocationSubscription;
pub use types::{LocationError, LocationResult};
