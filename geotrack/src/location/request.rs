//! Location request configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::types::LocationError;

/// Suggested time between updates.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Updates never arrive faster than this.
pub const DEFAULT_MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(2000);

/// Accuracy/power trade-off requested from the location source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Most precise fix available (satellite).
    #[default]
    HighAccuracy,
    /// Block-level accuracy.
    Balanced,
    /// City-level accuracy.
    LowPower,
    /// Only readings other clients already requested.
    Passive,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::HighAccuracy => "high_accuracy",
            Priority::Balanced => "balanced",
            Priority::LowPower => "low_power",
            Priority::Passive => "passive",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high_accuracy" | "high" => Ok(Priority::HighAccuracy),
            "balanced" => Ok(Priority::Balanced),
            "low_power" | "low" => Ok(Priority::LowPower),
            "passive" => Ok(Priority::Passive),
            other => Err(LocationError::InvalidRequest(format!(
                "unknown priority '{}'",
                other
            ))),
        }
    }
}

/// Parameters for a location subscription.
///
/// Defaults to high accuracy, a 5 s suggested interval and a 2 s floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    priority: Priority,
    interval: Duration,
    min_update_interval: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            priority: Priority::HighAccuracy,
            interval: DEFAULT_INTERVAL,
            min_update_interval: DEFAULT_MIN_UPDATE_INTERVAL,
        }
    }
}

impl LocationRequest {
    /// Create a request with the given priority and suggested interval.
    ///
    /// The minimum interval keeps its default unless that would exceed the
    /// suggested interval, in which case it is lowered to match.
    pub fn new(priority: Priority, interval: Duration) -> Self {
        Self {
            priority,
            interval,
            min_update_interval: DEFAULT_MIN_UPDATE_INTERVAL.min(interval),
        }
    }

    /// Set the minimum interval floor.
    pub fn with_min_update_interval(mut self, min: Duration) -> Self {
        self.min_update_interval = min;
        self
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn min_update_interval(&self) -> Duration {
        self.min_update_interval
    }

    /// Check the request is usable by a location source.
    pub fn validate(&self) -> Result<(), LocationError> {
        if self.interval.is_zero() {
            return Err(LocationError::InvalidRequest(
                "interval must be greater than zero".to_string(),
            ));
        }
        if self.min_update_interval > self.interval {
            return Err(LocationError::InvalidRequest(format!(
                "minimum interval {}ms exceeds suggested interval {}ms",
                self.min_update_interval.as_millis(),
                self.interval.as_millis()
            )));
        }
        Ok(())
    }
}
