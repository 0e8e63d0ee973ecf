//! The seam between subscriptions and a concrete location source.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::domain::{Coordinate, ObserverLocation};

use super::error::{LocationError, SensorFailure};
use super::options::WatchOptions;
use super::state::LocationState;

/// A raw position fix as delivered by a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius in metres.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// When the fix was taken; the receipt time is used if absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SensorFix {
    pub fn new(latitude: f64, longitude: f64, accuracy: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            timestamp: None,
        }
    }

    fn into_observer(self) -> ObserverLocation {
        ObserverLocation::at(
            Coordinate::new(self.latitude, self.longitude),
            self.accuracy,
            self.timestamp.unwrap_or_else(Utc::now),
        )
    }
}

/// Handle identifying one running watch on a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchToken(pub u64);

/// A source of continuous location updates.
///
/// Implementations deliver events through the [`FixSink`] they are given,
/// from whatever context suits them, until [`LocationSensor::clear_watch`]
/// is called for the returned token.
pub trait LocationSensor: Send + Sync {
    /// Whether the host has any location capability at all.
    fn is_supported(&self) -> bool;

    /// Start delivering fixes and failures to `sink`.
    fn watch_position(&self, options: &WatchOptions, sink: FixSink) -> WatchToken;

    /// Stop a watch. Unknown or already-cleared tokens are ignored.
    fn clear_watch(&self, token: WatchToken);
}

/// Receiving end handed to a sensor for one watch.
///
/// Once the owning subscription is cancelled every event is dropped, so a
/// sensor that keeps firing after `clear_watch` cannot change the state.
#[derive(Debug, Clone)]
pub struct FixSink {
    state: Arc<watch::Sender<LocationState>>,
    active: Arc<AtomicBool>,
}

impl FixSink {
    pub(crate) fn new(state: Arc<watch::Sender<LocationState>>, active: Arc<AtomicBool>) -> Self {
        Self { state, active }
    }

    /// Record a new fix. Returns false if the watch has been cancelled.
    pub fn on_fix(&self, fix: SensorFix) -> bool {
        let active = &self.active;
        self.state.send_if_modified(|state| {
            if !active.load(Ordering::SeqCst) {
                return false;
            }
            state.apply_fix(fix.into_observer());
            true
        })
    }

    /// Record a failed fix attempt. Returns false if the watch has been cancelled.
    pub fn on_failure(&self, failure: SensorFailure) -> bool {
        let active = &self.active;
        let error = LocationError::from(failure);
        self.state.send_if_modified(|state| {
            if !active.load(Ordering::SeqCst) {
                return false;
            }
            debug!(%error, "location fix failed");
            state.apply_failure(error);
            true
        })
    }

    /// Whether events are still being accepted.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
