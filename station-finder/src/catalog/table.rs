//! The immutable station catalog.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{CategoryId, Station, StationId, WasteCategory};

use super::error::CatalogError;

/// Read-only station and category tables.
///
/// A catalog is built once and then passed explicitly to whatever needs it;
/// nothing mutates it afterwards. Station order is the order in which
/// stations were added and is used as the tie-breaker when ranking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stations: Vec<Station>,
    categories: Vec<WasteCategory>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// All stations, in catalog order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Stations that currently accept drop-offs, in catalog order.
    pub fn active_stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(|s| s.is_active())
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id() == id)
    }

    pub fn categories(&self) -> &[WasteCategory] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&WasteCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Number of stations (active or not).
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Builder for a [`Catalog`].
///
/// Validation happens in [`CatalogBuilder::build`]: ids must be unique and
/// every station category must be defined.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    stations: Vec<Station>,
    categories: Vec<WasteCategory>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: WasteCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(&category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut station_ids = HashSet::new();
        for station in &self.stations {
            if !station_ids.insert(station.id()) {
                return Err(CatalogError::DuplicateStation(station.id().clone()));
            }

            if let Some(unknown) = station
                .supported_categories()
                .iter()
                .find(|c| !category_ids.contains(c))
            {
                return Err(CatalogError::UnknownCategory {
                    station: station.id().clone(),
                    category: unknown.clone(),
                });
            }

            // Kept as-is: distances from such a station are meaningless but
            // still computable.
            if !station.location().is_in_range() {
                warn!(
                    station = %station.id(),
                    location = %station.location(),
                    "station coordinate is outside the legal range"
                );
            }
        }

        Ok(Catalog {
            stations: self.stations,
            categories: self.categories,
        })
    }
}
