//! Domain types for the station finder.
//!
//! This module contains the core model: coordinates and great-circle
//! distance, stations, waste categories and observer fixes. Identifier
//! types enforce their invariants at construction time.

mod coordinate;
mod error;
mod id;
mod observer;
mod station;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, distance_km, round_km};
pub use error::DomainError;
pub use id::{CategoryId, InvalidId, StationId};
pub use observer::ObserverLocation;
pub use station::{Station, Unit, WasteCategory};
