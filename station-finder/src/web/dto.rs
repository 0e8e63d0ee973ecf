//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, ObserverLocation};
use crate::location::LocationState;
use crate::ranking::{RankedStation, StationDistance};

/// Query parameters for station listings.
#[derive(Debug, Default, Deserialize)]
pub struct StationsQuery {
    /// Observer latitude; must come with `lng`
    pub lat: Option<f64>,

    /// Observer longitude; must come with `lat`
    pub lng: Option<f64>,

    /// Maximum number of stations (nearby endpoint only)
    pub limit: Option<usize>,

    /// Only stations accepting this waste category
    pub category: Option<String>,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateResult {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for CoordinateResult {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}

/// The observer position used for a ranking.
#[derive(Debug, Clone, Serialize)]
pub struct ObserverResult {
    pub lat: f64,
    pub lng: f64,

    /// Accuracy radius in metres
    pub accuracy: Option<f64>,

    /// RFC 3339 timestamp of the fix
    pub timestamp: String,
}

impl ObserverResult {
    pub fn from_observer(observer: &ObserverLocation) -> Self {
        Self {
            lat: observer.coordinate.latitude,
            lng: observer.coordinate.longitude,
            accuracy: observer.accuracy_m,
            timestamp: observer.timestamp.to_rfc3339(),
        }
    }
}

/// A ranked station.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub hours: String,
    pub supported_categories: Vec<String>,

    /// Kilometres from the observer; absent when unknown
    pub distance_km: Option<f64>,

    /// `live` or `fallback`; absent when the distance is unknown
    pub distance_source: Option<&'static str>,
}

impl StationResult {
    pub fn from_ranked(ranked: &RankedStation<'_>) -> Self {
        let station = ranked.station;
        let location = station.location();
        let distance_source = match ranked.distance {
            StationDistance::Live(_) => Some("live"),
            StationDistance::Fallback(_) => Some("fallback"),
            StationDistance::Unknown => None,
        };

        Self {
            id: station.id().to_string(),
            name: station.name().to_string(),
            address: station.address().to_string(),
            lat: location.latitude,
            lng: location.longitude,
            hours: station.hours().to_string(),
            supported_categories: station
                .supported_categories()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            distance_km: ranked.distance_km(),
            distance_source,
        }
    }
}

/// Response for station listings.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Observer used for live distances, if any
    pub observer: Option<ObserverResult>,

    /// Where a map showing these stations should be centred
    pub center: CoordinateResult,

    pub stations: Vec<StationResult>,
}

/// Response for the live location endpoint.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// Whether a location sensor is configured at all
    pub enabled: bool,
    pub loading: bool,
    pub position: Option<ObserverResult>,
    pub error: Option<String>,
}

impl LocationResponse {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            loading: false,
            position: None,
            error: None,
        }
    }

    pub fn from_state(state: &LocationState) -> Self {
        Self {
            enabled: true,
            loading: state.loading,
            position: state.position.as_ref().map(ObserverResult::from_observer),
            error: state.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryId, Station, StationId};
    use crate::location::LocationError;

    fn make_station() -> Station {
        Station::new(
            StationId::parse("station-2").unwrap(),
            "Downtown Recycling Hub",
            Coordinate::new(37.7849, -122.4094),
            [
                CategoryId::parse("plastic").unwrap(),
                CategoryId::parse("ewaste").unwrap(),
            ],
        )
        .unwrap()
        .with_address("456 Main Street, Downtown")
        .with_hours("24/7")
    }

    #[test]
    fn station_result_from_ranked() {
        let station = make_station();
        let ranked = RankedStation {
            station: &station,
            distance: StationDistance::Live(1.2),
        };

        let result = StationResult::from_ranked(&ranked);
        assert_eq!(result.id, "station-2");
        assert_eq!(result.hours, "24/7");
        assert_eq!(result.supported_categories, vec!["plastic", "ewaste"]);
        assert_eq!(result.distance_km, Some(1.2));
        assert_eq!(result.distance_source, Some("live"));
    }

    #[test]
    fn unknown_distance_serializes_as_null() {
        let station = make_station();
        let ranked = RankedStation {
            station: &station,
            distance: StationDistance::Unknown,
        };

        let json = serde_json::to_value(StationResult::from_ranked(&ranked)).unwrap();
        assert!(json["distanceKm"].is_null());
        assert!(json["distanceSource"].is_null());
        assert_eq!(json["supportedCategories"][1], "ewaste");
    }

    #[test]
    fn location_response_from_state() {
        let mut state = LocationState::pending();
        state.apply_failure(LocationError::Denied("User denied".into()));

        let response = LocationResponse::from_state(&state);
        assert!(response.enabled);
        assert!(!response.loading);
        assert!(response.position.is_none());
        assert_eq!(response.error.as_deref(), Some("User denied"));
    }

    #[test]
    fn disabled_location_response() {
        let response = LocationResponse::disabled();
        assert!(!response.enabled);
        assert!(response.error.is_none());
    }
}
