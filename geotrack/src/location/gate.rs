//! Minimum-interval floor shared by location sources.

use std::time::{Duration, Instant};

use super::types::LocationResult;

/// Drops readings that arrive sooner than the minimum interval after the last
/// forwarded one.
#[derive(Debug, Clone)]
pub struct IntervalGate {
    min_interval: Duration,
    last_forwarded: Option<Instant>,
}

impl IntervalGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_forwarded: None,
        }
    }

    /// Returns `true` and records `now` if a reading at `now` may pass.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_forwarded {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_forwarded = Some(now);
        true
    }

    /// Gate a source reading.
    ///
    /// Readings without a fix always pass and leave the floor untouched, so
    /// a fix right after a no-fix report is not held back.
    pub fn admit_result(&mut self, result: &LocationResult, now: Instant) -> bool {
        result.last_location.is_none() || self.admit(now)
    }
}
