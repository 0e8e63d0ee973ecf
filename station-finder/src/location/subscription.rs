//! Scoped location subscriptions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::ObserverLocation;

use super::error::LocationError;
use super::options::WatchOptions;
use super::sensor::{FixSink, LocationSensor, WatchToken};
use super::state::LocationState;

/// A live watch on a location sensor.
///
/// The watch is released by [`Subscription::unsubscribe`] or, failing that,
/// when the subscription is dropped. Release discards the last position;
/// after that no further updates reach the state, whatever the sensor does.
pub struct Subscription {
    sensor: Arc<dyn LocationSensor>,
    token: Option<WatchToken>,
    state: Arc<watch::Sender<LocationState>>,
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Begin observing `sensor`.
    ///
    /// Never blocks. If the sensor is unsupported the subscription is born
    /// finished: not loading, `error` set to [`LocationError::Unsupported`],
    /// and no watch is created.
    pub fn subscribe(sensor: Arc<dyn LocationSensor>, options: WatchOptions) -> Self {
        if !sensor.is_supported() {
            warn!("location sensor unsupported on this host");
            let (state, _) = watch::channel(LocationState::unsupported());
            return Self {
                sensor,
                token: None,
                state: Arc::new(state),
                active: Arc::new(AtomicBool::new(false)),
            };
        }

        let (state, _) = watch::channel(LocationState::pending());
        let state = Arc::new(state);
        let active = Arc::new(AtomicBool::new(true));

        let sink = FixSink::new(state.clone(), active.clone());
        let token = sensor.watch_position(&options, sink);
        debug!(token = token.0, ?options, "location watch started");

        Self {
            sensor,
            token: Some(token),
            state,
            active,
        }
    }

    /// Release the sensor watch and discard the last fix.
    ///
    /// Receivers are notified once of the teardown. Calling this again does
    /// nothing.
    pub fn unsubscribe(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };

        let active = &self.active;
        // Flip the flag under the channel lock so no in-flight event lands
        // after this returns.
        self.state.send_modify(|state| {
            active.store(false, Ordering::SeqCst);
            state.apply_end();
        });

        self.sensor.clear_watch(token);
        debug!(token = token.0, "location watch cleared");
    }

    /// Whether the sensor watch is still running.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LocationState {
        self.state.borrow().clone()
    }

    /// Most recent fix, if any.
    pub fn position(&self) -> Option<ObserverLocation> {
        self.state.borrow().position.clone()
    }

    /// Most recent failure, if any.
    pub fn error(&self) -> Option<LocationError> {
        self.state.borrow().error.clone()
    }

    /// True until the first fix or failure.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// A receiver that is notified whenever the state changes.
    ///
    /// Receivers outlive the subscription; they keep the last state and see
    /// no further changes once it is released.
    pub fn watch(&self) -> watch::Receiver<LocationState> {
        self.state.subscribe()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .field("active", &self.is_active())
            .finish()
    }
}
