//! Observable state of a location subscription.

use crate::domain::ObserverLocation;

use super::error::LocationError;

/// What consumers see of a subscription at any moment.
///
/// `loading` is true until the first fix or failure. A failure leaves the
/// last known `position` in place, and a later fix leaves the last `error`
/// in place. Ending the subscription discards `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    pub position: Option<ObserverLocation>,
    pub error: Option<LocationError>,
    pub loading: bool,
}

impl LocationState {
    /// State before any sensor event.
    pub fn pending() -> Self {
        Self {
            position: None,
            error: None,
            loading: true,
        }
    }

    /// State for a host with no location capability.
    pub fn unsupported() -> Self {
        Self {
            position: None,
            error: Some(LocationError::Unsupported),
            loading: false,
        }
    }

    pub(crate) fn apply_fix(&mut self, fix: ObserverLocation) {
        self.position = Some(fix);
        self.loading = false;
    }

    pub(crate) fn apply_failure(&mut self, error: LocationError) {
        self.error = Some(error);
        self.loading = false;
    }

    /// The subscription ended: the last fix is no longer trusted.
    pub(crate) fn apply_end(&mut self) {
        self.position = None;
        self.loading = false;
    }
}

impl Default for LocationState {
    fn default() -> Self {
        Self::pending()
    }
}
