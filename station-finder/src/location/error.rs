//! Location sensor errors.

use std::path::PathBuf;

/// Message used when the sensor reports a failure without any text.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Unable to retrieve your location";

/// Failure categories reported by a location sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other,
}

/// A failed fix attempt as reported by the sensor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SensorFailure {
    pub kind: FailureKind,
    /// Platform-supplied text, if any.
    #[serde(default)]
    pub message: Option<String>,
}

impl SensorFailure {
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Errors surfaced by a location subscription.
///
/// `Unsupported` is reported once when subscribing and is final. The other
/// variants describe a single failed fix; the subscription stays active and a
/// later fix may still succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The host has no location capability
    #[error("Geolocation is not supported on this host")]
    Unsupported,

    /// The user or platform refused access
    #[error("{0}")]
    Denied(String),

    /// No position could be determined
    #[error("{0}")]
    Unavailable(String),

    /// No fix arrived within the configured timeout
    #[error("{0}")]
    Timeout(String),

    /// Any other sensor failure
    #[error("{0}")]
    Other(String),
}

impl LocationError {
    /// Whether a later fix can still succeed on the same subscription.
    pub fn is_transient(&self) -> bool {
        !matches!(self, LocationError::Unsupported)
    }
}

impl From<SensorFailure> for LocationError {
    fn from(failure: SensorFailure) -> Self {
        let message = failure
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

        match failure.kind {
            FailureKind::PermissionDenied => LocationError::Denied(message),
            FailureKind::PositionUnavailable => LocationError::Unavailable(message),
            FailureKind::Timeout => LocationError::Timeout(message),
            FailureKind::Other => LocationError::Other(message),
        }
    }
}

/// Errors loading a replay track.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// Reading the track file failed
    #[error("failed to read track {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Track JSON could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A step must carry exactly one of `fix` or `failure`
    #[error("track step {0} must have exactly one of `fix` or `failure`")]
    InvalidStep(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_message_is_kept() {
        let err: LocationError = SensorFailure::new(FailureKind::PermissionDenied)
            .with_message("User denied Geolocation")
            .into();
        assert_eq!(err, LocationError::Denied("User denied Geolocation".into()));
        assert_eq!(err.to_string(), "User denied Geolocation");
    }

    #[test]
    fn missing_message_uses_default() {
        let err: LocationError = SensorFailure::new(FailureKind::Timeout).into();
        assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
        assert!(matches!(err, LocationError::Timeout(_)));

        let err: LocationError = SensorFailure::new(FailureKind::Other).with_message("  ").into();
        assert_eq!(err, LocationError::Other(DEFAULT_FAILURE_MESSAGE.into()));
    }

    #[test]
    fn kinds_map_to_variants() {
        let unavailable: LocationError = SensorFailure::new(FailureKind::PositionUnavailable).into();
        assert!(matches!(unavailable, LocationError::Unavailable(_)));
    }

    #[test]
    fn only_unsupported_is_final() {
        assert!(!LocationError::Unsupported.is_transient());
        assert!(LocationError::Denied("x".into()).is_transient());
        assert!(LocationError::Timeout("x".into()).is_transient());
    }

    #[test]
    fn failure_kind_serde() {
        let failure: SensorFailure =
            serde_json::from_str(r#"{ "kind": "permission_denied" }"#).unwrap();
        assert_eq!(failure, SensorFailure::new(FailureKind::PermissionDenied));
    }

    #[test]
    fn track_error_display() {
        assert_eq!(
            TrackError::InvalidStep(2).to_string(),
            "track step 2 must have exactly one of `fix` or `failure`"
        );
    }
}
