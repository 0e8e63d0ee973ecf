//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::domain::ObserverLocation;
use crate::location::LocationState;
use crate::ranking::RankingConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station and category tables
    pub catalog: Arc<Catalog>,

    /// Ranking configuration
    pub config: Arc<RankingConfig>,

    /// Live location feed, when a sensor is configured
    pub location: Option<watch::Receiver<LocationState>>,
}

impl AppState {
    /// Create app state without a live location feed.
    pub fn new(catalog: Catalog, config: RankingConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            location: None,
        }
    }

    /// Attach a live location feed.
    pub fn with_location(mut self, location: watch::Receiver<LocationState>) -> Self {
        self.location = Some(location);
        self
    }

    /// Latest live fix, if a feed is attached and has produced one.
    pub fn live_position(&self) -> Option<ObserverLocation> {
        self.location
            .as_ref()
            .and_then(|rx| rx.borrow().position.clone())
    }
}
