//! Simulated location source.
//!
//! Walks a slow, deterministic curve from a start coordinate, emitting one
//! reading per suggested interval. Useful when no receiver is attached and for
//! exercising the empty-reading path.

use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::gate::IntervalGate;
use super::request::LocationRequest;
use super::service::{deliver, LocationService};
use super::subscription::LocationSubscription;
use super::types::{LocationError, LocationResult};
use crate::coord::{Coordinate, FALLBACK_LOCATION};
use crate::event::EventSender;

/// Meters per degree of latitude (mean).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Settings for the simulated walk.
#[derive(Debug, Clone)]
pub struct SimulatedConfig {
    /// First reading.
    pub start: Coordinate,
    /// Distance covered between readings.
    pub step_meters: f64,
    /// Initial heading in degrees (0 = north).
    pub bearing_deg: f64,
    /// Heading change per reading.
    pub turn_deg: f64,
    /// Emit an empty reading every N ticks.
    pub empty_every: Option<u32>,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            start: FALLBACK_LOCATION,
            step_meters: 25.0,
            bearing_deg: 45.0,
            turn_deg: 6.0,
            empty_every: None,
        }
    }
}

/// The walk itself, independent of timing.
#[derive(Debug, Clone)]
pub struct SimulatedWalk {
    config: SimulatedConfig,
    position: Coordinate,
    bearing_deg: f64,
    tick: u64,
}

impl SimulatedWalk {
    pub fn new(config: SimulatedConfig) -> Self {
        Self {
            position: config.start,
            bearing_deg: config.bearing_deg,
            config,
            tick: 0,
        }
    }

    /// Produce the next callback payload.
    pub fn next_result(&mut self) -> LocationResult {
        self.tick += 1;

        if let Some(n) = self.config.empty_every {
            if n > 0 && self.tick % n as u64 == 0 {
                return LocationResult::empty();
            }
        }

        // The first reading is the start point itself
        if self.tick > 1 {
            self.advance();
        }
        LocationResult::fix(self.position)
    }

    fn advance(&mut self) {
        let bearing = self.bearing_deg.to_radians();
        let dlat = self.config.step_meters * bearing.cos() / METERS_PER_DEGREE;
        let lat_scale = self.position.latitude.to_radians().cos().max(1e-6);
        let dlon = self.config.step_meters * bearing.sin() / (METERS_PER_DEGREE * lat_scale);

        let latitude = (self.position.latitude + dlat).clamp(-89.9, 89.9);
        let mut longitude = self.position.longitude + dlon;
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }

        self.position = Coordinate::new(latitude, longitude);
        self.bearing_deg = (self.bearing_deg + self.config.turn_deg).rem_euclid(360.0);
    }
}

/// Location service backed by [`SimulatedWalk`].
pub struct SimulatedLocationService {
    runtime: Handle,
    config: SimulatedConfig,
}

impl SimulatedLocationService {
    /// Create a simulated source running its timer on `runtime`.
    pub fn new(runtime: Handle, config: SimulatedConfig) -> Self {
        Self { runtime, config }
    }
}

impl LocationService for SimulatedLocationService {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn subscribe(
        &self,
        request: &LocationRequest,
        events: EventSender,
    ) -> Result<LocationSubscription, LocationError> {
        request.validate()?;

        let token = CancellationToken::new();
        let cancel = token.clone();
        let mut walk = SimulatedWalk::new(self.config.clone());
        let mut gate = IntervalGate::new(request.min_update_interval());
        let interval = request.interval();

        info!(
            start = %self.config.start,
            interval_ms = interval.as_millis() as u64,
            min_interval_ms = request.min_update_interval().as_millis() as u64,
            priority = %request.priority(),
            "Starting simulated location updates"
        );

        self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => {
                        debug!("Simulated location task cancelled");
                        break;
                    }

                    _ = ticker.tick() => {
                        let result = walk.next_result();
                        let now = tokio::time::Instant::now().into_std();
                        if !gate.admit_result(&result, now) {
                            continue;
                        }
                        if !deliver(&events, result) {
                            debug!("Event channel closed, stopping simulated source");
                            break;
                        }
                    }
                }
            }
        });

        Ok(LocationSubscription::new(self.name(), token))
    }
}
