//! Recycling station finder.
//!
//! Ranks recycling drop-off stations by distance from the user, using a
//! live location feed when one is available and precomputed distances
//! otherwise.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod location;
pub mod ranking;
pub mod web;
