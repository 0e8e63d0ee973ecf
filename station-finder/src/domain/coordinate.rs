//! Geographic coordinates and great-circle distance.

use std::fmt;

use super::error::DomainError;

/// Mean Earth radius used by the spherical model, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Out-of-range values are representable. Distances computed from them are
/// well defined but carry no geographic meaning; use [`Coordinate::validate`]
/// where input comes from an untrusted source.
///
/// # Examples
///
/// ```
/// use station_finder::domain::Coordinate;
///
/// let equator = Coordinate::new(0.0, 0.0);
/// let one_east = Coordinate::new(0.0, 1.0);
/// let d = equator.distance_to(&one_east);
/// assert!((d - 111.19).abs() < 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if latitude is in [-90, 90] and longitude in [-180, 180].
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Reject coordinates outside the legal latitude/longitude range.
    pub fn validate(self) -> Result<Self, DomainError> {
        if self.is_in_range() {
            Ok(self)
        } else {
            Err(DomainError::CoordinateOutOfRange {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Great-circle distance to `other` in kilometres.
    ///
    /// See [`distance_km`].
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_km(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Haversine distance between two coordinates on a sphere of radius
/// [`EARTH_RADIUS_KM`], in kilometres.
///
/// Never fails for finite input. Ranges are not checked.
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` fractionally past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for display.
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    proptest! {
        #[test]
        fn symmetric(a in coordinate(), b in coordinate()) {
            let ab = distance_km(&a, &b);
            let ba = distance_km(&b, &a);
            prop_assert!((ab - ba).abs() <= TOLERANCE, "{} vs {}", ab, ba);
        }

        #[test]
        fn identity(a in coordinate()) {
            prop_assert_eq!(distance_km(&a, &a), 0.0);
        }

        #[test]
        fn non_negative(a in coordinate(), b in coordinate()) {
            prop_assert!(distance_km(&a, &b) >= 0.0);
        }

        #[test]
        fn triangle_inequality(a in coordinate(), b in coordinate(), c in coordinate()) {
            let ac = distance_km(&a, &c);
            let ab = distance_km(&a, &b);
            let bc = distance_km(&b, &c);
            // Relative slack for accumulated rounding on ~20 000 km values.
            prop_assert!(ac <= ab + bc + 1e-6, "{} > {} + {}", ac, ab, bc);
        }

        #[test]
        fn bounded_by_half_circumference(a in coordinate(), b in coordinate()) {
            let half = std::f64::consts::PI * EARTH_RADIUS_KM;
            prop_assert!(distance_km(&a, &b) <= half + 1e-6);
        }

        /// Unvalidated input never produces NaN or a negative distance.
        #[test]
        fn finite_for_unconstrained_input(
            lat1 in -1000.0f64..1000.0, lon1 in -1000.0f64..1000.0,
            lat2 in -1000.0f64..1000.0, lon2 in -1000.0f64..1000.0,
        ) {
            let d = distance_km(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2));
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
        }
    }
}
