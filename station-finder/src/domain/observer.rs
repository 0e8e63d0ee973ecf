//! The observer's position as reported by a location sensor.

use chrono::{DateTime, Utc};

use super::coordinate::Coordinate;

/// A single position fix for the observer.
///
/// Supersedes every station's static fallback distance while present.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverLocation {
    pub coordinate: Coordinate,
    /// Accuracy radius in metres, when the sensor reports one.
    pub accuracy_m: Option<f64>,
    /// When the fix was taken.
    pub timestamp: DateTime<Utc>,
}

impl ObserverLocation {
    /// A fix taken now.
    pub fn new(coordinate: Coordinate, accuracy_m: Option<f64>) -> Self {
        Self::at(coordinate, accuracy_m, Utc::now())
    }

    pub fn at(coordinate: Coordinate, accuracy_m: Option<f64>, timestamp: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            accuracy_m,
            timestamp,
        }
    }

    /// Age of the fix relative to `now`. Fixes from the future count as fresh.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.timestamp).max(chrono::Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn age_is_elapsed_time() {
        let taken = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let fix = ObserverLocation::at(Coordinate::new(1.0, 2.0), Some(15.0), taken);

        let now = taken + chrono::Duration::seconds(12);
        assert_eq!(fix.age(now), chrono::Duration::seconds(12));
    }

    #[test]
    fn future_fix_has_zero_age() {
        let taken = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let fix = ObserverLocation::at(Coordinate::new(1.0, 2.0), None, taken);

        let earlier = taken - chrono::Duration::seconds(3);
        assert_eq!(fix.age(earlier), chrono::Duration::zero());
    }
}
