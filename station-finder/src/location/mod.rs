//! Observer location tracking.
//!
//! A [`Subscription`] wraps a [`LocationSensor`] and exposes the latest
//! fix, the latest failure and a loading flag. Sensors push events through
//! a [`FixSink`]; ranking code only ever sees the resulting
//! `Option<ObserverLocation>`.

mod error;
mod mock;
mod options;
mod replay;
mod sensor;
mod state;
mod subscription;

pub use error::{DEFAULT_FAILURE_MESSAGE, FailureKind, LocationError, SensorFailure, TrackError};
pub use mock::MockSensor;
pub use options::WatchOptions;
pub use replay::{ReplaySensor, ReplayStep};
pub use sensor::{FixSink, LocationSensor, SensorFix, WatchToken};
pub use state::LocationState;
pub use subscription::Subscription;
