//! GeoTrackApp implementation.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::config::LocationSourceKind;
use crate::event::{event_channel, EventReceiver};
use crate::location::{GpsdLocationService, LocationService, SimulatedLocationService};
use crate::map::MapCanvas;
use crate::permission::PermissionSystem;
use crate::store::LocationStore;
use crate::tracker::{Tracker, TrackerParts};

/// How long shutdown waits for location tasks to finish.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// A running tracker with its own runtime.
///
/// The runtime hosts the location source and permission callbacks; the
/// tracker itself is driven from the caller's thread through
/// [`pump`](Self::pump) or [`wait_for_event`](Self::wait_for_event).
pub struct GeoTrackApp {
    tracker: Tracker<MapCanvas>,
    events: EventReceiver,
    store: LocationStore,
    config: AppConfig,
    runtime: Runtime,
}

impl GeoTrackApp {
    /// Start with a fresh location store.
    pub fn start_sync(
        config: AppConfig,
        permissions: Arc<dyn PermissionSystem>,
    ) -> Result<Self, AppError> {
        Self::start_sync_with_store(config, permissions, LocationStore::new())
    }

    /// Start sharing an existing location store.
    ///
    /// The map opens on the store's current coordinate if there is one.
    pub fn start_sync_with_store(
        config: AppConfig,
        permissions: Arc<dyn PermissionSystem>,
        store: LocationStore,
    ) -> Result<Self, AppError> {
        let request = config.location.request();
        request.validate()?;

        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("geotrack-rt")
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;

        let location = create_location_service(&config, &runtime);
        let (tx, rx) = event_channel();

        let mut tracker = Tracker::new(TrackerParts {
            permissions,
            location,
            request,
            store: store.clone(),
            widget: MapCanvas::new(),
            map_config: config.map.clone(),
            events: tx,
        });

        info!(
            source = %config.location.source,
            permission = %config.permission,
            interval_ms = request.interval().as_millis() as u64,
            "Starting GeoTrackApp"
        );
        tracker.launch();

        Ok(Self {
            tracker,
            events: rx,
            store,
            config,
            runtime,
        })
    }

    /// Apply all pending events. Returns the number applied.
    pub fn pump(&mut self) -> usize {
        self.tracker.drain(&mut self.events)
    }

    /// Block up to `timeout` for one event, apply it, then drain the rest.
    ///
    /// Returns the number of events applied.
    pub fn wait_for_event(&mut self, timeout: Duration) -> usize {
        let events = &mut self.events;
        let first = self
            .runtime
            .block_on(async { tokio::time::timeout(timeout, events.recv()).await });

        match first {
            Ok(Some(event)) => {
                self.tracker.handle(event);
                1 + self.pump()
            }
            _ => 0,
        }
    }

    pub fn tracker(&self) -> &Tracker<MapCanvas> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker<MapCanvas> {
        &mut self.tracker
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Tear down the tracker and stop the runtime.
    pub fn shutdown(mut self) {
        info!("Shutting down GeoTrackApp");
        self.tracker.teardown();
        self.runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
        info!("GeoTrackApp shutdown complete");
    }
}

fn create_location_service(config: &AppConfig, runtime: &Runtime) -> Arc<dyn LocationService> {
    match config.location.source {
        LocationSourceKind::Simulated => Arc::new(SimulatedLocationService::new(
            runtime.handle().clone(),
            config.simulation.clone(),
        )),
        LocationSourceKind::Gpsd => Arc::new(GpsdLocationService::new(
            runtime.handle().clone(),
            config.location.gpsd_host.clone(),
            config.location.gpsd_port,
        )),
    }
}
