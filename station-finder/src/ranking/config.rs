//! Ranking configuration.

use crate::domain::Coordinate;

/// Map centre used when no observer location is known (Jaipur).
const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 26.9124,
    longitude: 75.7873,
};

/// Parameters for station ranking and presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// How many stations the "nearby" list shows.
    pub nearby_count: usize,

    /// Where a map is centred when the observer's position is unknown.
    pub default_center: Coordinate,
}

impl RankingConfig {
    pub fn new(nearby_count: usize, default_center: Coordinate) -> Self {
        Self {
            nearby_count,
            default_center,
        }
    }

    pub fn with_nearby_count(mut self, nearby_count: usize) -> Self {
        self.nearby_count = nearby_count;
        self
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            nearby_count: 3,
            default_center: DEFAULT_CENTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RankingConfig::default();
        assert_eq!(config.nearby_count, 3);
        assert_eq!(config.default_center, Coordinate::new(26.9124, 75.7873));
    }

    #[test]
    fn custom_config() {
        let config = RankingConfig::new(5, Coordinate::new(1.0, 2.0));
        assert_eq!(config.nearby_count, 5);
        assert_eq!(config.with_nearby_count(1).nearby_count, 1);
    }
}
