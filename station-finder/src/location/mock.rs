//! In-memory sensor for tests and offline development.
//!
//! Fixes and failures are pushed by hand. Like some real platforms, the mock
//! keeps calling every sink it was ever given, even after `clear_watch`,
//! which makes it useful for checking that cancelled subscriptions ignore
//! late events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::SensorFailure;
use super::options::WatchOptions;
use super::sensor::{FixSink, LocationSensor, SensorFix, WatchToken};

#[derive(Debug, Default)]
struct MockState {
    next_token: u64,
    sinks: Vec<(WatchToken, FixSink)>,
    live: Vec<WatchToken>,
    cleared: usize,
    last_options: Option<WatchOptions>,
}

/// Hand-driven location sensor.
#[derive(Debug, Clone)]
pub struct MockSensor {
    supported: bool,
    state: Arc<Mutex<MockState>>,
}

impl MockSensor {
    /// A supported sensor with no watches.
    pub fn new() -> Self {
        Self {
            supported: true,
            state: Arc::default(),
        }
    }

    /// A host without location capability.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            state: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a fix to every sink. Returns how many accepted it.
    pub fn push_fix(&self, fix: SensorFix) -> usize {
        let sinks = self.sinks();
        sinks.iter().filter(|sink| sink.on_fix(fix.clone())).count()
    }

    /// Deliver a failure to every sink. Returns how many accepted it.
    pub fn push_failure(&self, failure: SensorFailure) -> usize {
        let sinks = self.sinks();
        sinks
            .iter()
            .filter(|sink| sink.on_failure(failure.clone()))
            .count()
    }

    // Clone the sinks out so no lock is held while they run.
    fn sinks(&self) -> Vec<FixSink> {
        self.lock().sinks.iter().map(|(_, s)| s.clone()).collect()
    }

    /// Number of watches started and not yet cleared.
    pub fn live_watches(&self) -> usize {
        self.lock().live.len()
    }

    /// Total number of watches ever started.
    pub fn watches_started(&self) -> usize {
        self.lock().sinks.len()
    }

    /// Number of successful `clear_watch` calls.
    pub fn cleared_watches(&self) -> usize {
        self.lock().cleared
    }

    /// Options passed to the most recent watch.
    pub fn last_options(&self) -> Option<WatchOptions> {
        self.lock().last_options.clone()
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSensor for MockSensor {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn watch_position(&self, options: &WatchOptions, sink: FixSink) -> WatchToken {
        let mut state = self.lock();
        state.next_token += 1;
        let token = WatchToken(state.next_token);
        state.sinks.push((token, sink));
        state.live.push(token);
        state.last_options = Some(options.clone());
        token
    }

    fn clear_watch(&self, token: WatchToken) {
        let mut state = self.lock();
        let before = state.live.len();
        state.live.retain(|t| *t != token);
        if state.live.len() < before {
            state.cleared += 1;
        }
    }
}
