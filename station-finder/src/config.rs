//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default size of the nearby list.
const DEFAULT_NEARBY_COUNT: usize = 3;

const ADDR_VAR: &str = "STATION_FINDER_ADDR";
const CATALOG_VAR: &str = "STATION_FINDER_CATALOG";
const TRACK_VAR: &str = "STATION_FINDER_TRACK";
const NEARBY_VAR: &str = "STATION_FINDER_NEARBY";

/// Errors in the process configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Listen address could not be parsed
    #[error("{var}: invalid socket address {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    /// A numeric setting could not be parsed
    #[error("{var}: expected a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Catalog JSON file; the bundled catalog is used if unset.
    pub catalog_path: Option<PathBuf>,

    /// Replay track driving the live location feed; no feed if unset.
    pub track_path: Option<PathBuf>,

    /// How many stations the nearby endpoint returns by default.
    pub nearby_count: usize,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_value = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: addr_value.clone(),
            })?;

        let nearby_count = match get(NEARBY_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: NEARBY_VAR,
                    value,
                })?,
            None => DEFAULT_NEARBY_COUNT,
        };

        Ok(Self {
            addr,
            catalog_path: get(CATALOG_VAR).map(PathBuf::from),
            track_path: get(TRACK_VAR).map(PathBuf::from),
            nearby_count,
        })
    }
}
