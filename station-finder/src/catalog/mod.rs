//! Station catalog.
//!
//! Stations and waste categories are static configuration: loaded once
//! (from a JSON file or the bundled default) and then shared read-only.

mod error;
mod loader;
mod table;

pub use error::CatalogError;
pub use loader::{CatalogFile, CategoryDto, StationDto};
pub use table::{Catalog, CatalogBuilder};
