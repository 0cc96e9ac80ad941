//! One-shot permission flow gating location updates.

use tracing::{debug, info};

use super::system::PermissionSystem;
use super::types::{
    AccessLevel, Permission, PermissionResponse, PermissionStatus, LOCATION_PERMISSIONS,
};
use crate::event::EventSender;

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Launch has not run yet.
    Unrequested,
    /// The combined request is outstanding.
    Pending,
    /// Terminal. Later responses are ignored.
    Resolved(FlowOutcome),
}

/// Final result of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Granted(AccessLevel),
    Denied,
}

/// What the caller should do after a flow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    /// Start the location subscription.
    StartUpdates(AccessLevel),
    /// A request was issued; wait for its reply.
    AwaitResponse,
    /// Nothing to do.
    Idle,
}

/// Permission state machine.
///
/// ```text
/// Unrequested ──check granted──────────────► Resolved(Granted(Fine))
///      │
///      └──request(fine+coarse)──► Pending ──reply──► Resolved(Granted | Denied)
/// ```
#[derive(Debug)]
pub struct PermissionFlow {
    state: FlowState,
}

impl Default for PermissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Unrequested,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Whether location updates were allowed.
    pub fn granted_level(&self) -> Option<AccessLevel> {
        match self.state {
            FlowState::Resolved(FlowOutcome::Granted(level)) => Some(level),
            _ => None,
        }
    }

    /// Run the launch-time check, issuing the combined request if needed.
    ///
    /// Only the first call has any effect.
    pub fn launch(&mut self, system: &dyn PermissionSystem, events: &EventSender) -> FlowAction {
        if self.state != FlowState::Unrequested {
            debug!(state = ?self.state, "Permission flow already launched");
            return FlowAction::Idle;
        }

        if system.check(Permission::FineLocation) == PermissionStatus::Granted {
            info!("Fine location already granted");
            self.state = FlowState::Resolved(FlowOutcome::Granted(AccessLevel::Fine));
            return FlowAction::StartUpdates(AccessLevel::Fine);
        }

        info!("Requesting location permissions");
        self.state = FlowState::Pending;
        system.request(&LOCATION_PERMISSIONS, events);
        FlowAction::AwaitResponse
    }

    /// Apply the reply to the combined request.
    pub fn on_response(&mut self, response: &PermissionResponse) -> FlowAction {
        if self.state != FlowState::Pending {
            debug!(state = ?self.state, "Ignoring unexpected permission response");
            return FlowAction::Idle;
        }

        match response.access_level() {
            Some(level) => {
                info!(?level, "Location permission granted");
                self.state = FlowState::Resolved(FlowOutcome::Granted(level));
                FlowAction::StartUpdates(level)
            }
            None => {
                info!("Location permission denied");
                self.state = FlowState::Resolved(FlowOutcome::Denied);
                FlowAction::Idle
            }
        }
    }
}
