//! Station proximity ranking.
//!
//! Ranking is a pure function of the catalog and the observer's position.
//! Callers re-run it whenever either changes; nothing is cached.

use std::cmp::Ordering;

use crate::catalog::Catalog;
use crate::domain::{CategoryId, Coordinate, ObserverLocation, Station, round_km};

use super::config::RankingConfig;

/// Distance attached to a ranked station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StationDistance {
    /// Computed from the observer's live fix, rounded to 0.1 km.
    Live(f64),
    /// The station's precomputed distance, used when there is no fix.
    Fallback(f64),
    /// Neither a fix nor a precomputed distance is available.
    Unknown,
}

impl StationDistance {
    pub fn km(&self) -> Option<f64> {
        match self {
            StationDistance::Live(km) | StationDistance::Fallback(km) => Some(*km),
            StationDistance::Unknown => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, StationDistance::Live(_))
    }
}

/// A station annotated with its resolved distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation<'a> {
    pub station: &'a Station,
    pub distance: StationDistance,
}

impl RankedStation<'_> {
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.km()
    }
}

/// Resolve a station's distance: live when a fix exists, otherwise the
/// station's fallback, otherwise unknown.
pub fn resolve_distance(station: &Station, observer: Option<&ObserverLocation>) -> StationDistance {
    match observer {
        Some(observer) => {
            StationDistance::Live(round_km(observer.coordinate.distance_to(&station.location())))
        }
        None => station
            .fallback_distance_km()
            .map_or(StationDistance::Unknown, StationDistance::Fallback),
    }
}

/// Unrounded distance used for ordering.
fn sort_key(station: &Station, observer: Option<&ObserverLocation>) -> Option<f64> {
    match observer {
        Some(observer) => Some(observer.coordinate.distance_to(&station.location())),
        None => station.fallback_distance_km(),
    }
}

/// Order two sort keys: ascending, unknown last.
fn compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn rank<'a>(
    stations: impl Iterator<Item = &'a Station>,
    observer: Option<&ObserverLocation>,
) -> Vec<RankedStation<'a>> {
    let mut keyed: Vec<(Option<f64>, RankedStation<'a>)> = stations
        .map(|station| {
            let ranked = RankedStation {
                station,
                distance: resolve_distance(station, observer),
            };
            (sort_key(station, observer), ranked)
        })
        .collect();

    // Stable: ties and unknown distances keep catalog order.
    keyed.sort_by(|(a, _), (b, _)| compare(*a, *b));
    keyed.into_iter().map(|(_, ranked)| ranked).collect()
}

/// Rank every active station by distance, nearest first.
///
/// Inactive stations are excluded. Live distances are ordered before
/// rounding, so two stations shown at the same 0.1 km are still nearest
/// first. Stations whose distance cannot be resolved come last, in catalog
/// order.
pub fn rank_stations<'a>(
    catalog: &'a Catalog,
    observer: Option<&ObserverLocation>,
) -> Vec<RankedStation<'a>> {
    rank(catalog.active_stations(), observer)
}

/// Rank active stations that accept `category`.
pub fn rank_stations_supporting<'a>(
    catalog: &'a Catalog,
    observer: Option<&ObserverLocation>,
    category: &CategoryId,
) -> Vec<RankedStation<'a>> {
    rank(
        catalog.active_stations().filter(|s| s.supports(category)),
        observer,
    )
}

/// The first `config.nearby_count` stations of [`rank_stations`].
pub fn nearby<'a>(
    catalog: &'a Catalog,
    observer: Option<&ObserverLocation>,
    config: &RankingConfig,
) -> Vec<RankedStation<'a>> {
    let mut ranked = rank_stations(catalog, observer);
    ranked.truncate(config.nearby_count);
    ranked
}

/// Where to centre a map: the observer if known, else the configured default.
pub fn map_center(observer: Option<&ObserverLocation>, config: &RankingConfig) -> Coordinate {
    observer.map_or(config.default_center, |o| o.coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn station(id: &str, lat: f64, lon: f64, fallback: Option<f64>) -> Station {
        let s = Station::new(
            StationId::parse(id).unwrap(),
            id,
            Coordinate::new(lat, lon),
            [CategoryId::parse("paper").unwrap()],
        )
        .unwrap();
        match fallback {
            Some(km) => s.with_fallback_distance(km).unwrap(),
            None => s,
        }
    }

    #[test]
    fn live_distance_is_rounded() {
        let s = station("a", 0.0, 1.0, Some(9.9));
        let observer = ObserverLocation::new(Coordinate::new(0.0, 0.0), None);

        // 111.195 km
        assert_eq!(
            resolve_distance(&s, Some(&observer)),
            StationDistance::Live(111.2)
        );
    }

    #[test]
    fn fallback_used_without_observer() {
        let s = station("a", 0.0, 1.0, Some(0.8));
        assert_eq!(resolve_distance(&s, None), StationDistance::Fallback(0.8));
    }

    #[test]
    fn unknown_without_observer_or_fallback() {
        let s = station("a", 0.0, 1.0, None);
        let d = resolve_distance(&s, None);
        assert_eq!(d, StationDistance::Unknown);
        assert_eq!(d.km(), None);
        assert!(!d.is_live());
    }

    #[test]
    fn live_ignores_fallback() {
        let s = station("a", 0.0, 0.0, Some(42.0));
        let observer = ObserverLocation::new(Coordinate::new(0.0, 0.0), None);
        let d = resolve_distance(&s, Some(&observer));
        assert!(d.is_live());
        assert_eq!(d.km(), Some(0.0));
    }

    #[test]
    fn compare_orders_unknown_last() {
        assert_eq!(compare(Some(1.0), Some(2.0)), Ordering::Less);
        assert_eq!(compare(Some(3.0), None), Ordering::Less);
        assert_eq!(compare(None, Some(0.0)), Ordering::Greater);
        assert_eq!(compare(None, None), Ordering::Equal);
    }

    #[test]
    fn sort_key_is_unrounded() {
        let s = station("a", 0.0, 1.0, Some(9.9));
        let observer = ObserverLocation::new(Coordinate::new(0.0, 0.0), None);

        let key = sort_key(&s, Some(&observer)).unwrap();
        assert!((key - 111.195).abs() < 0.001, "got {key}");
        assert_eq!(sort_key(&s, None), Some(9.9));
        assert_eq!(sort_key(&station("b", 0.0, 1.0, None), None), None);
    }

    #[test]
    fn map_center_prefers_observer() {
        let config = RankingConfig::default();
        assert_eq!(map_center(None, &config), Coordinate::new(26.9124, 75.7873));

        let observer = ObserverLocation::new(Coordinate::new(37.77, -122.41), Some(5.0));
        assert_eq!(
            map_center(Some(&observer), &config),
            Coordinate::new(37.77, -122.41)
        );
    }
}
