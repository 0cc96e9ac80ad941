//! Published location state.
//!
//! Holds the most recent coordinate for everyone who displays it. The store is
//! created once per process and handed to each screen explicitly; cloning it
//! shares the same state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::coord::Coordinate;

/// Receiver side for UI code that re-renders on change.
pub type LocationWatch = watch::Receiver<Option<Coordinate>>;

/// Latest published coordinate.
#[derive(Debug, Clone)]
pub struct LocationStore {
    inner: Arc<watch::Sender<Option<Coordinate>>>,
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { inner: Arc::new(tx) }
    }

    /// Replace the published coordinate.
    pub fn publish(&self, coordinate: Coordinate) {
        self.inner.send_replace(Some(coordinate));
    }

    /// The current coordinate, if one has been published.
    pub fn current(&self) -> Option<Coordinate> {
        *self.inner.borrow()
    }

    /// Subscribe to changes.
    pub fn watch(&self) -> LocationWatch {
        self.inner.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_published() {
        let store = LocationStore::new();
        assert_eq!(store.current(), None);

        store.publish(Coordinate::new(1.0, 2.0));
        assert_eq!(store.current(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_clones_share_state() {
        let store = LocationStore::new();
        let other = store.clone();
        other.publish(Coordinate::new(3.0, 4.0));
        assert_eq!(store.current(), Some(Coordinate::new(3.0, 4.0)));
    }

    #[test]
    fn test_watch_sees_changes() {
        let store = LocationStore::new();
        let mut watch = store.watch();
        assert!(!watch.has_changed().unwrap());

        store.publish(Coordinate::new(5.0, 6.0));
        assert!(watch.has_changed().unwrap());
        assert_eq!(*watch.borrow_and_update(), Some(Coordinate::new(5.0, 6.0)));
        assert!(!watch.has_changed().unwrap());
    }
}
