//! Location source abstraction.

use tracing::trace;

use super::request::LocationRequest;
use super::subscription::LocationSubscription;
use super::types::{LocationError, LocationResult};
use crate::event::{AppEvent, EventSender};

/// A fused location source.
///
/// Implementations post one [`AppEvent::Location`] per callback to the sender
/// passed at subscription time, never faster than the request's minimum
/// interval, until the returned subscription is unsubscribed.
pub trait LocationService: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Start periodic updates.
    fn subscribe(
        &self,
        request: &LocationRequest,
        events: EventSender,
    ) -> Result<LocationSubscription, LocationError>;
}

/// Post a location callback.
///
/// Returns `false` once the receiving side is gone, which tells the producing
/// task to stop.
pub fn deliver(events: &EventSender, result: LocationResult) -> bool {
    trace!(?result, "Delivering location callback");
    events.send(AppEvent::Location(result)).is_ok()
}
