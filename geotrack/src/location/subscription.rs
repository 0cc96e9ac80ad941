//! Handle for an active location subscription.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::info;

/// An active subscription to a location source.
///
/// Source tasks watch the cancellation token and stop producing once it is
/// cancelled. Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct LocationSubscription {
    source: &'static str,
    token: CancellationToken,
    unsubscribed: AtomicBool,
}

impl LocationSubscription {
    /// Create a subscription for the named source.
    pub fn new(source: &'static str, token: CancellationToken) -> Self {
        Self {
            source,
            token,
            unsubscribed: AtomicBool::new(false),
        }
    }

    /// Whether updates may still be produced.
    pub fn is_active(&self) -> bool {
        !self.unsubscribed.load(Ordering::SeqCst)
    }

    /// Stop updates.
    ///
    /// Returns `true` only for the call that actually unsubscribed.
    pub fn unsubscribe(&self) -> bool {
        if self.unsubscribed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.token.cancel();
        info!(source = self.source, "Location updates removed");
        true
    }
}

impl Drop for LocationSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubscribe_once() {
        let token = CancellationToken::new();
        let sub = LocationSubscription::new("test", token.clone());

        assert!(sub.is_active());
        assert!(sub.unsubscribe());
        assert!(!sub.unsubscribe());
        assert!(!sub.is_active());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_drop_cancels_token() {
        let token = CancellationToken::new();
        {
            let _sub = LocationSubscription::new("test", token.clone());
        }
        assert!(token.is_cancelled());
    }
}
