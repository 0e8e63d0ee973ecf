//! Web layer for the station finder.
//!
//! Exposes ranked station listings and the live location state as JSON.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
