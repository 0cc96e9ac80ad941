//! The single update channel feeding the tracker.
//!
//! Permission replies and location readings are both asynchronous callbacks.
//! Producers never touch application state; they post an [`AppEvent`] and the
//! [`Tracker`](crate::tracker::Tracker) applies it on the UI loop.

use tokio::sync::mpsc;

use crate::location::LocationResult;
use crate::permission::PermissionResponse;

/// A message produced by a platform callback.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Reply to the combined location permission request.
    PermissionResult(PermissionResponse),
    /// A location callback fired.
    Location(LocationResult),
}

/// Sending half handed to permission systems and location sources.
pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Receiving half drained by the UI loop.
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Create the application event channel.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
