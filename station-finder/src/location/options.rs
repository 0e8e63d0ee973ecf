//! Options passed to the sensor when a watch starts.

use std::time::Duration;

/// Default maximum age of a cached fix (10 seconds).
const DEFAULT_MAXIMUM_AGE: Duration = Duration::from_secs(10);

/// Default time allowed for a fix attempt (20 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for a continuous location watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Ask the sensor for its most accurate mode.
    pub high_accuracy: bool,

    /// A cached fix younger than this may be delivered instead of waiting.
    pub maximum_age: Duration,

    /// A fix attempt taking longer than this fails with a timeout.
    pub timeout: Duration,
}

impl WatchOptions {
    pub fn new(high_accuracy: bool, maximum_age: Duration, timeout: Duration) -> Self {
        Self {
            high_accuracy,
            maximum_age,
            timeout,
        }
    }

    pub fn with_maximum_age(mut self, maximum_age: Duration) -> Self {
        self.maximum_age = maximum_age;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age: DEFAULT_MAXIMUM_AGE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
