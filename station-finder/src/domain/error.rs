//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from catalog loading and sensor errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude outside the legal range
    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    /// Station must accept at least one waste category
    #[error("station {0} supports no categories")]
    NoCategories(String),

    /// Static fallback distance must be a finite, non-negative number
    #[error("station {0} has an invalid fallback distance")]
    InvalidFallbackDistance(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::CoordinateOutOfRange {
            latitude: 961.0,
            longitude: 75.5,
        };
        assert_eq!(
            err.to_string(),
            "coordinate out of range: latitude 961, longitude 75.5"
        );

        let err = DomainError::NoCategories("station-9".into());
        assert_eq!(err.to_string(), "station station-9 supports no categories");

        let err = DomainError::InvalidFallbackDistance("station-9".into());
        assert_eq!(
            err.to_string(),
            "station station-9 has an invalid fallback distance"
        );
    }
}
