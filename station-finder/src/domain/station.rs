//! Drop-off stations and the waste categories they accept.

use super::coordinate::Coordinate;
use super::error::DomainError;
use super::id::{CategoryId, StationId};

/// Measurement unit for a waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Count,
}

/// A kind of recyclable waste accepted at stations.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteCategory {
    pub id: CategoryId,
    pub name: String,
    pub unit: Unit,
    /// Payout rate per unit delivered.
    pub base_rate_per_unit: f64,
    /// Reward points earned per unit delivered.
    pub points_per_unit: u32,
}

/// A recycling drop-off station.
///
/// Stations are immutable once placed in a catalog. Every station accepts
/// at least one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    address: String,
    location: Coordinate,
    is_active: bool,
    hours: String,
    supported_categories: Vec<CategoryId>,
    fallback_distance_km: Option<f64>,
}

impl Station {
    /// Create an active station with no address, hours or fallback distance.
    ///
    /// Duplicate categories are collapsed, keeping first-seen order.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        location: Coordinate,
        categories: impl IntoIterator<Item = CategoryId>,
    ) -> Result<Self, DomainError> {
        let mut supported_categories: Vec<CategoryId> = Vec::new();
        for category in categories {
            if !supported_categories.contains(&category) {
                supported_categories.push(category);
            }
        }

        if supported_categories.is_empty() {
            return Err(DomainError::NoCategories(id.to_string()));
        }

        Ok(Self {
            id,
            name: name.into(),
            address: String::new(),
            location,
            is_active: true,
            hours: String::new(),
            supported_categories,
            fallback_distance_km: None,
        })
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = hours.into();
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Attach a precomputed distance, used when no live location is known.
    pub fn with_fallback_distance(mut self, km: f64) -> Result<Self, DomainError> {
        if !km.is_finite() || km < 0.0 {
            return Err(DomainError::InvalidFallbackDistance(self.id.to_string()));
        }
        self.fallback_distance_km = Some(km);
        Ok(self)
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn hours(&self) -> &str {
        &self.hours
    }

    pub fn supported_categories(&self) -> &[CategoryId] {
        &self.supported_categories
    }

    pub fn supports(&self, category: &CategoryId) -> bool {
        self.supported_categories.contains(category)
    }

    pub fn fallback_distance_km(&self) -> Option<f64> {
        self.fallback_distance_km
    }
}
