//! Screen controller.
//!
//! The `Tracker` owns one screen's worth of state: the permission flow, the
//! location subscription and the map view. Every asynchronous callback
//! reaches it as an [`AppEvent`] and is applied by [`Tracker::handle`], the
//! only place that publishes coordinates or moves the map.
//!
//! # Flow
//!
//! ```text
//! launch() ──► PermissionFlow ──granted──► LocationService::subscribe
//!                    ▲                              │
//!   PermissionResult │                              │ Location
//!                    └──────── AppEvent channel ◄───┘
//!                                     │
//!                              Tracker::handle
//!                                     │
//!                   LocationStore::publish + MapViewAdapter::show_location
//! ```

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::coord::Coordinate;
use crate::event::{AppEvent, EventReceiver, EventSender};
use crate::location::{LocationRequest, LocationResult, LocationService, LocationSubscription};
use crate::map::{MapViewAdapter, MapViewConfig, MapWidget};
use crate::permission::{AccessLevel, FlowAction, PermissionFlow, PermissionSystem};
use crate::status::StatusCard;
use crate::store::LocationStore;

/// Whether the screen is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Created,
    Running,
    TornDown,
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Coordinates published.
    pub updates_applied: u64,
    /// Callbacks without a fix.
    pub empty_readings: u64,
    /// Events discarded because the screen was torn down.
    pub discarded_after_teardown: u64,
}

/// Everything a tracker needs from its host.
pub struct TrackerParts<W: MapWidget> {
    pub permissions: Arc<dyn PermissionSystem>,
    pub location: Arc<dyn LocationService>,
    pub request: LocationRequest,
    pub store: LocationStore,
    pub widget: W,
    pub map_config: MapViewConfig,
    pub events: EventSender,
}

/// Controller for the location screen.
pub struct Tracker<W: MapWidget> {
    permissions: Arc<dyn PermissionSystem>,
    location: Arc<dyn LocationService>,
    request: LocationRequest,
    store: LocationStore,
    map: MapViewAdapter<W>,
    events: EventSender,
    flow: PermissionFlow,
    subscription: Option<LocationSubscription>,
    phase: TrackerPhase,
    stats: TrackerStats,
}

impl<W: MapWidget> Tracker<W> {
    /// Build the screen. The map is created immediately, centered on the
    /// store's last coordinate or the fallback.
    pub fn new(parts: TrackerParts<W>) -> Self {
        let map = MapViewAdapter::create(parts.widget, &parts.map_config, parts.store.current());

        Self {
            permissions: parts.permissions,
            location: parts.location,
            request: parts.request,
            store: parts.store,
            map,
            events: parts.events,
            flow: PermissionFlow::new(),
            subscription: None,
            phase: TrackerPhase::Created,
            stats: TrackerStats::default(),
        }
    }

    /// Run the launch-time permission check.
    pub fn launch(&mut self) {
        if self.phase != TrackerPhase::Created {
            debug!(phase = ?self.phase, "Tracker already launched");
            return;
        }
        self.phase = TrackerPhase::Running;

        let action = self.flow.launch(self.permissions.as_ref(), &self.events);
        self.apply_flow_action(action);
    }

    /// Apply one event. Returns `true` if the published coordinate changed.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        if self.phase == TrackerPhase::TornDown {
            self.stats.discarded_after_teardown += 1;
            trace!(?event, "Discarding event after teardown");
            return false;
        }

        match event {
            AppEvent::PermissionResult(response) => {
                let action = self.flow.on_response(&response);
                self.apply_flow_action(action);
                false
            }
            AppEvent::Location(result) => self.on_location_result(result),
        }
    }

    /// Apply every queued event without blocking. Returns the number handled.
    pub fn drain(&mut self, events: &mut EventReceiver) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Stop location updates and release the map view.
    ///
    /// Returns `true` if this call removed the location subscription.
    pub fn teardown(&mut self) -> bool {
        if self.phase == TrackerPhase::TornDown {
            return false;
        }
        self.phase = TrackerPhase::TornDown;

        let unsubscribed = self
            .subscription
            .take()
            .map(|sub| sub.unsubscribe())
            .unwrap_or(false);
        self.map.detach();

        info!(
            unsubscribed,
            updates = self.stats.updates_applied,
            "Tracker torn down"
        );
        unsubscribed
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn map(&self) -> &MapViewAdapter<W> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapViewAdapter<W> {
        &mut self.map
    }

    pub fn permission_flow(&self) -> &PermissionFlow {
        &self.flow
    }

    /// Whether a location subscription is live.
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .map(LocationSubscription::is_active)
            .unwrap_or(false)
    }

    /// Card content for the current published state.
    pub fn status_card(&self) -> StatusCard {
        StatusCard::from_location(self.store.current())
    }

    fn apply_flow_action(&mut self, action: FlowAction) {
        if let FlowAction::StartUpdates(level) = action {
            self.start_updates(level);
        }
    }

    fn start_updates(&mut self, level: AccessLevel) {
        if self.subscription.is_some() {
            return;
        }

        match self.location.subscribe(&self.request, self.events.clone()) {
            Ok(subscription) => {
                info!(
                    source = self.location.name(),
                    ?level,
                    "Location updates started"
                );
                self.subscription = Some(subscription);
            }
            Err(e) => {
                // Stays in the waiting state
                warn!(source = self.location.name(), error = %e, "Failed to start location updates");
            }
        }
    }

    fn on_location_result(&mut self, result: LocationResult) -> bool {
        match result.last_location {
            Some(location) => {
                self.apply_location(location);
                true
            }
            None => {
                self.stats.empty_readings += 1;
                trace!("Location callback without a fix");
                false
            }
        }
    }

    fn apply_location(&mut self, location: Coordinate) {
        self.store.publish(location);
        self.map.show_location(location);
        self.stats.updates_applied += 1;
        debug!(%location, "Location published");
    }
}

impl<W: MapWidget> Drop for Tracker<W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::event_channel;
    use crate::location::LocationError;
    use crate::map::MapCanvas;
    use crate::permission::StaticPermissions;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_util::sync::CancellationToken;

    /// Location service that only records subscriptions; tests post events
    /// themselves.
    #[derive(Default)]
    struct ManualLocation {
        subscribes: AtomicUsize,
        tokens: parking_lot::Mutex<Vec<CancellationToken>>,
    }

    impl LocationService for ManualLocation {
        fn name(&self) -> &'static str {
            "manual"
        }

        fn subscribe(
            &self,
            _request: &LocationRequest,
            _events: EventSender,
        ) -> Result<LocationSubscription, LocationError> {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
            let token = CancellationToken::new();
            self.tokens.lock().push(token.clone());
            Ok(LocationSubscription::new("manual", token))
        }
    }

    fn tracker(
        permissions: StaticPermissions,
    ) -> (Tracker<MapCanvas>, Arc<ManualLocation>, EventReceiver) {
        let (tx, rx) = event_channel();
        let location = Arc::new(ManualLocation::default());
        let tracker = Tracker::new(TrackerParts {
            permissions: Arc::new(permissions),
            location: location.clone(),
            request: LocationRequest::default(),
            store: LocationStore::new(),
            widget: MapCanvas::new(),
            map_config: MapViewConfig::default(),
            events: tx,
        });
        (tracker, location, rx)
    }

    fn fix(lat: f64, lon: f64) -> AppEvent {
        AppEvent::Location(LocationResult::fix(Coordinate::new(lat, lon)))
    }

    #[test]
    fn test_granted_launch_subscribes() {
        let (mut tracker, location, _rx) = tracker(StaticPermissions::already_granted());
        tracker.launch();

        assert!(tracker.is_subscribed());
        assert_eq!(location.subscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_permission_reply_drives_subscription() {
        let (mut tracker, location, mut rx) =
            tracker(StaticPermissions::grant_on_request(AccessLevel::Coarse));
        tracker.launch();
        assert!(!tracker.is_subscribed());

        assert_eq!(tracker.drain(&mut rx), 1);
        assert!(tracker.is_subscribed());
        assert_eq!(location.subscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_location_publishes_and_moves_map_once() {
        let (mut tracker, _location, _rx) = tracker(StaticPermissions::already_granted());
        tracker.launch();

        assert!(tracker.handle(fix(37.422, -122.084)));

        assert_eq!(
            tracker.store().current(),
            Some(Coordinate::new(37.422, -122.084))
        );
        let map = tracker.map();
        assert_eq!(map.widget().center(), Coordinate::new(37.422, -122.084));
        assert_eq!(map.widget().markers().len(), 1);
        assert_eq!(map.update_count(), 1);
        assert_eq!(map.widget().redraw_count(), 1);
    }

    #[test]
    fn test_empty_reading_changes_nothing() {
        let (mut tracker, _location, _rx) = tracker(StaticPermissions::already_granted());
        tracker.launch();
        tracker.handle(fix(1.0, 2.0));

        assert!(!tracker.handle(AppEvent::Location(LocationResult::empty())));

        assert_eq!(tracker.store().current(), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(tracker.map().widget().markers()[0].position, Coordinate::new(1.0, 2.0));
        assert_eq!(tracker.stats().empty_readings, 1);
    }

    #[test]
    fn test_teardown_unsubscribes_once_and_freezes_state() {
        let (mut tracker, location, _rx) = tracker(StaticPermissions::already_granted());
        tracker.launch();
        tracker.handle(fix(1.0, 2.0));

        assert!(tracker.teardown());
        assert!(!tracker.teardown());
        assert!(location.tokens.lock()[0].is_cancelled());

        assert!(!tracker.handle(fix(5.0, 6.0)));
        assert_eq!(tracker.store().current(), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(tracker.stats().discarded_after_teardown, 1);
    }

    #[test]
    fn test_status_card_follows_store() {
        let (mut tracker, _location, _rx) = tracker(StaticPermissions::already_granted());
        tracker.launch();
        assert!(tracker.status_card().is_waiting());

        tracker.handle(fix(37.422, -122.084));
        assert_eq!(tracker.status_card().lines[0], "Latitude: 37.422000");
    }
}
