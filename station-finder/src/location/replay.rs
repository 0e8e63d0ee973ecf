//! Sensor that replays a recorded track.
//!
//! A track is a JSON array of steps. Each step waits `delay_ms` and then
//! delivers either a `fix` or a `failure`:
//!
//! ```json
//! [
//!   { "delay_ms": 1500, "fix": { "latitude": 37.779, "longitude": -122.415, "accuracy": 25.0 } },
//!   { "delay_ms": 5000, "failure": { "kind": "position_unavailable" } }
//! ]
//! ```
//!
//! Each watch replays the track from the start on its own tokio task, so
//! `watch_position` must be called from within a runtime.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use super::error::{FailureKind, SensorFailure, TrackError};
use super::options::WatchOptions;
use super::sensor::{FixSink, LocationSensor, SensorFix, WatchToken};

/// Message for a fix attempt that ran past the watch timeout.
const TIMEOUT_MESSAGE: &str = "Timeout expired";

/// One step of a replay track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Wait before this event, measured from the previous one.
    pub delay_ms: u64,
    #[serde(default)]
    pub fix: Option<SensorFix>,
    #[serde(default)]
    pub failure: Option<SensorFailure>,
}

#[derive(Debug, Clone)]
enum ReplayEvent {
    Fix(SensorFix),
    Failure(SensorFailure),
}

impl ReplayStep {
    fn event(&self) -> Option<ReplayEvent> {
        match (&self.fix, &self.failure) {
            (Some(fix), None) => Some(ReplayEvent::Fix(fix.clone())),
            (None, Some(failure)) => Some(ReplayEvent::Failure(failure.clone())),
            _ => None,
        }
    }
}

/// Most recent fix seen by any watch, shared with new watches.
type LastFix = Arc<Mutex<Option<(Instant, SensorFix)>>>;

/// Location sensor driven by a prerecorded track.
#[derive(Debug)]
pub struct ReplaySensor {
    steps: Arc<Vec<(u64, ReplayEvent)>>,
    next_token: AtomicU64,
    tasks: Mutex<HashMap<WatchToken, JoinHandle<()>>>,
    last_fix: LastFix,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ReplaySensor {
    /// Build a sensor from track steps, rejecting malformed steps.
    pub fn new(steps: Vec<ReplayStep>) -> Result<Self, TrackError> {
        let steps = steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                step.event()
                    .map(|event| (step.delay_ms, event))
                    .ok_or(TrackError::InvalidStep(i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            steps: Arc::new(steps),
            next_token: AtomicU64::new(1),
            tasks: Mutex::new(HashMap::new()),
            last_fix: LastFix::default(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, TrackError> {
        let steps: Vec<ReplayStep> = serde_json::from_str(json).map_err(|e| TrackError::Json {
            message: e.to_string(),
        })?;
        Self::new(steps)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TrackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sensor = Self::from_json_str(&json)?;
        info!(path = %path.display(), steps = sensor.len(), "loaded replay track");
        Ok(sensor)
    }

    /// Number of steps in the track.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of watches whose replay task is still registered.
    pub fn running_watches(&self) -> usize {
        lock(&self.tasks).len()
    }
}

impl LocationSensor for ReplaySensor {
    fn is_supported(&self) -> bool {
        true
    }

    fn watch_position(&self, options: &WatchOptions, sink: FixSink) -> WatchToken {
        let token = WatchToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let task = tokio::spawn(replay(
            self.steps.clone(),
            self.last_fix.clone(),
            options.clone(),
            sink,
        ));
        lock(&self.tasks).insert(token, task);
        token
    }

    fn clear_watch(&self, token: WatchToken) {
        if let Some(task) = lock(&self.tasks).remove(&token) {
            task.abort();
        }
    }
}

impl Drop for ReplaySensor {
    fn drop(&mut self) {
        for (_, task) in lock(&self.tasks).drain() {
            task.abort();
        }
    }
}

async fn replay(
    steps: Arc<Vec<(u64, ReplayEvent)>>,
    last_fix: LastFix,
    options: WatchOptions,
    sink: FixSink,
) {
    let cached = lock(&last_fix)
        .as_ref()
        .filter(|(at, _)| at.elapsed() <= options.maximum_age)
        .map(|(_, fix)| fix.clone());

    let mut have_fix = false;
    if let Some(fix) = cached {
        debug!("delivering cached fix");
        have_fix = sink.on_fix(fix);
    }

    for (delay_ms, event) in steps.iter() {
        if !sink.is_active() {
            return;
        }

        let delay = std::time::Duration::from_millis(*delay_ms);
        if !have_fix && delay > options.timeout {
            sleep(options.timeout).await;
            sink.on_failure(
                SensorFailure::new(FailureKind::Timeout).with_message(TIMEOUT_MESSAGE),
            );
            sleep(delay - options.timeout).await;
        } else {
            sleep(delay).await;
        }

        match event {
            ReplayEvent::Fix(fix) => {
                *lock(&last_fix) = Some((Instant::now(), fix.clone()));
                have_fix = sink.on_fix(fix.clone()) || have_fix;
            }
            ReplayEvent::Failure(failure) => {
                sink.on_failure(failure.clone());
            }
        }
    }

    debug!("replay track finished");
}
