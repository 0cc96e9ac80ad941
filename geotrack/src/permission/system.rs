//! Permission system abstraction and a scripted implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use super::types::{AccessLevel, Permission, PermissionResponse, PermissionStatus};
use crate::event::{AppEvent, EventSender};

/// Host capability for querying and requesting permissions.
///
/// `request` is fire-and-forget: the answer arrives later as an
/// [`AppEvent::PermissionResult`] on `events`.
pub trait PermissionSystem: Send + Sync {
    /// Whether `permission` is already held.
    fn check(&self, permission: Permission) -> PermissionStatus;

    /// Ask for `permissions` and post the reply to `events`.
    fn request(&self, permissions: &[Permission], events: &EventSender);
}

/// Deliver a permission reply, ignoring a closed channel.
pub fn send_response(events: &EventSender, response: PermissionResponse) {
    if events.send(AppEvent::PermissionResult(response)).is_err() {
        debug!("Permission reply dropped: event channel closed");
    }
}

/// Permission system with a fixed set of grants and scripted answers.
///
/// Used for non-interactive runs and tests. Granted answers are remembered, so
/// a later `check` reports them as held.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    held: Mutex<BTreeSet<Permission>>,
    answers: BTreeMap<Permission, PermissionStatus>,
    requests: AtomicUsize,
}

impl StaticPermissions {
    /// Nothing held, every request denied.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Fine location already held before launch.
    pub fn already_granted() -> Self {
        Self::default().with_held(Permission::FineLocation)
    }

    /// Nothing held; the request grants `level`.
    pub fn grant_on_request(level: AccessLevel) -> Self {
        let this = Self::default();
        match level {
            AccessLevel::Fine => this
                .with_answer(Permission::FineLocation, PermissionStatus::Granted)
                .with_answer(Permission::CoarseLocation, PermissionStatus::Granted),
            AccessLevel::Coarse => this
                .with_answer(Permission::FineLocation, PermissionStatus::Denied)
                .with_answer(Permission::CoarseLocation, PermissionStatus::Granted),
        }
    }

    /// Mark `permission` as already held.
    pub fn with_held(self, permission: Permission) -> Self {
        self.held.lock().insert(permission);
        self
    }

    /// Script the answer for `permission`.
    pub fn with_answer(mut self, permission: Permission, status: PermissionStatus) -> Self {
        self.answers.insert(permission, status);
        self
    }

    /// Number of `request` calls received.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl PermissionSystem for StaticPermissions {
    fn check(&self, permission: Permission) -> PermissionStatus {
        if self.held.lock().contains(&permission) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn request(&self, permissions: &[Permission], events: &EventSender) {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let response: PermissionResponse = permissions
            .iter()
            .map(|p| {
                let status = self
                    .answers
                    .get(p)
                    .copied()
                    .unwrap_or(PermissionStatus::Denied);
                (*p, status)
            })
            .collect();

        {
            let mut held = self.held.lock();
            for (permission, status) in response.iter() {
                if status.is_granted() {
                    held.insert(permission);
                }
            }
        }

        send_response(events, response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::event_channel;
    use crate::permission::LOCATION_PERMISSIONS;

    #[test]
    fn test_deny_all_replies_denied() {
        let system = StaticPermissions::deny_all();
        let (tx, mut rx) = event_channel();

        system.request(&LOCATION_PERMISSIONS, &tx);

        let event = rx.try_recv().unwrap();
        match event {
            AppEvent::PermissionResult(response) => assert_eq!(response.access_level(), None),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(system.request_count(), 1);
    }

    #[test]
    fn test_granted_answer_is_remembered() {
        let system = StaticPermissions::grant_on_request(AccessLevel::Coarse);
        let (tx, _rx) = event_channel();

        assert_eq!(
            system.check(Permission::CoarseLocation),
            PermissionStatus::Denied
        );
        system.request(&LOCATION_PERMISSIONS, &tx);
        assert_eq!(
            system.check(Permission::CoarseLocation),
            PermissionStatus::Granted
        );
        assert_eq!(
            system.check(Permission::FineLocation),
            PermissionStatus::Denied
        );
    }

    #[test]
    fn test_request_with_closed_channel_does_not_panic() {
        let system = StaticPermissions::already_granted();
        let (tx, rx) = event_channel();
        drop(rx);
        system.request(&LOCATION_PERMISSIONS, &tx);
    }
}
