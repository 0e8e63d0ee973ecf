//! Proximity ranking of stations.
//!
//! Annotates each active station with a live or fallback distance and
//! orders stations nearest first for maps and nearby lists.

mod config;
mod rank;


pub use config::RankingConfig;
pub use rank::{
    RankedStation, StationDistance, map_center, nearby, rank_stations, rank_stations_supporting,
    resolve_distance,
};
