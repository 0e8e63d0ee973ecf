//! Catalog error types.

use std::path::PathBuf;

use crate::domain::{CategoryId, DomainError, InvalidId, StationId};

/// Errors that can occur when building or loading a station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the catalog file failed
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// An identifier in the catalog is malformed
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// A station or category failed domain validation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Two stations share an id
    #[error("duplicate station id: {0}")]
    DuplicateStation(StationId),

    /// Two categories share an id
    #[error("duplicate category id: {0}")]
    DuplicateCategory(CategoryId),

    /// A station accepts a category the catalog does not define
    #[error("station {station} references unknown category {category}")]
    UnknownCategory {
        station: StationId,
        category: CategoryId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::DuplicateStation(StationId::parse("station-1").unwrap());
        assert_eq!(err.to_string(), "duplicate station id: station-1");

        let err = CatalogError::UnknownCategory {
            station: StationId::parse("station-1").unwrap(),
            category: CategoryId::parse("tyres").unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "station station-1 references unknown category tyres"
        );

        let err = CatalogError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }
}
