//! JSON catalog files.
//!
//! The on-disk shape mirrors the front-end data tables: camelCase keys,
//! flat `lat`/`lng` fields, and an optional precomputed `distance`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{CategoryId, Coordinate, Station, StationId, Unit, WasteCategory};

use super::table::Catalog;
use super::error::CatalogError;

/// Built-in catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Top-level catalog document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
    pub stations: Vec<StationDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub base_rate_per_unit: f64,
    pub points_per_unit: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub hours: String,
    pub supported_categories: Vec<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}

fn default_active() -> bool {
    true
}

impl CategoryDto {
    fn into_domain(self) -> Result<WasteCategory, CatalogError> {
        Ok(WasteCategory {
            id: CategoryId::parse(&self.id)?,
            name: self.name,
            unit: self.unit,
            base_rate_per_unit: self.base_rate_per_unit,
            points_per_unit: self.points_per_unit,
        })
    }
}

impl StationDto {
    fn into_domain(self) -> Result<Station, CatalogError> {
        let id = StationId::parse(&self.id)?;
        let categories = self
            .supported_categories
            .iter()
            .map(|c| CategoryId::parse(c))
            .collect::<Result<Vec<_>, _>>()?;

        let station = Station::new(id, self.name, Coordinate::new(self.lat, self.lng), categories)?
            .with_address(self.address)
            .with_hours(self.hours)
            .with_active(self.is_active);

        match self.distance {
            Some(km) => Ok(station.with_fallback_distance(km)?),
            None => Ok(station),
        }
    }
}

impl CatalogFile {
    /// Convert the document into a validated catalog.
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let mut builder = Catalog::builder();

        for category in self.categories {
            builder = builder.category(category.into_domain()?);
        }

        for station in self.stations {
            builder = builder.station(station.into_domain()?);
        }

        builder.build()
    }
}

impl Catalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })?;
        file.into_catalog()
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading catalog");

        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            stations = catalog.len(),
            categories = catalog.categories().len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SMALL: &str = r#"{
        "categories": [
            { "id": "paper", "name": "Paper", "unit": "kg", "baseRatePerUnit": 1.8, "pointsPerUnit": 8 }
        ],
        "stations": [
            { "id": "a", "name": "A", "lat": 1.0, "lng": 2.0,
              "supportedCategories": ["paper"], "distance": 0.4 },
            { "id": "b", "name": "B", "address": "2 Side St", "lat": 3.0, "lng": 4.0,
              "isActive": false, "hours": "24/7", "supportedCategories": ["PAPER"] }
        ]
    }"#;

    #[test]
    fn parse_small_catalog() {
        let catalog = Catalog::from_json_str(SMALL).unwrap();
        assert_eq!(catalog.len(), 2);

        let a = &catalog.stations()[0];
        assert_eq!(a.id().as_str(), "a");
        assert!(a.is_active());
        assert_eq!(a.address(), "");
        assert_eq!(a.fallback_distance_km(), Some(0.4));
        assert_eq!(a.location(), Coordinate::new(1.0, 2.0));

        let b = &catalog.stations()[1];
        assert!(!b.is_active());
        assert_eq!(b.hours(), "24/7");
        assert_eq!(b.address(), "2 Side St");
        assert_eq!(b.fallback_distance_km(), None);
        assert!(b.supports(&CategoryId::parse("paper").unwrap()));
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.categories().len(), 6);
        assert!(catalog.stations().iter().all(|s| s.location().is_in_range()));
        assert!(
            catalog
                .stations()
                .iter()
                .all(|s| s.fallback_distance_km().is_some())
        );
    }

    #[test]
    fn malformed_json() {
        let result = Catalog::from_json_str("{ not json");
        assert!(matches!(result, Err(CatalogError::Json { .. })));
    }

    #[test]
    fn missing_categories_field_means_no_categories() {
        let json = r#"{ "stations": [
            { "id": "a", "name": "A", "lat": 0.0, "lng": 0.0, "supportedCategories": ["paper"] }
        ] }"#;
        let result = Catalog::from_json_str(json);
        assert!(matches!(result, Err(CatalogError::UnknownCategory { .. })));
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let json = r#"{ "categories": [], "stations": [
            { "id": "a", "name": "A", "lat": 0.0, "lng": 0.0, "supportedCategories": [] }
        ] }"#;
        let result = Catalog::from_json_str(json);
        assert!(matches!(result, Err(CatalogError::Domain(_))));
    }

    #[test]
    fn bad_station_id_is_rejected() {
        let json = r#"{ "categories": [
            { "id": "paper", "name": "Paper", "unit": "kg", "baseRatePerUnit": 1.0, "pointsPerUnit": 1 }
        ], "stations": [
            { "id": "bad id", "name": "A", "lat": 0.0, "lng": 0.0, "supportedCategories": ["paper"] }
        ] }"#;
        let result = Catalog::from_json_str(json);
        assert!(matches!(result, Err(CatalogError::InvalidId(_))));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let json = r#"{ "categories": [
            { "id": "paper", "name": "Paper", "unit": "kg", "baseRatePerUnit": 1.0, "pointsPerUnit": 1 }
        ], "stations": [
            { "id": "a", "name": "A", "lat": 0.0, "lng": 0.0, "supportedCategories": ["paper"],
              "distance": -1.0 }
        ] }"#;
        let result = Catalog::from_json_str(json);
        assert!(matches!(result, Err(CatalogError::Domain(_))));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, SMALL).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn missing_file() {
        let result = Catalog::load("/nonexistent/path/catalog.json");
        match result {
            Err(CatalogError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/path/catalog.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
