//! Reference data error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying the reference tables
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Reference file could not be read
    #[error("Failed to read reference data {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// Reference file is not valid TOML or does not match the schema
    #[error("Failed to parse reference data: {0}")]
    Parse(String),

    /// Two records share the same key
    #[error("Duplicate {kind}: {name}")]
    Duplicate { kind: &'static str, name: String },

    /// A record has an empty key
    #[error("Empty {0} name in reference data")]
    EmptyName(&'static str),

    /// Requested technology does not exist
    #[error("Technology not found: {0}")]
    TechnologyNotFound(String),

    /// Requested building type has no ranking
    #[error("Building type not found: {0}")]
    BuildingTypeNotFound(String),

    /// Ranking position outside the building type's list
    #[error("No ranking entry #{rank} for {building_type}")]
    RankNotFound { building_type: String, rank: usize },
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

/// Result type alias for reference data operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::TechnologyNotFound("Tidal Kite".to_string());
        assert_eq!(err.to_string(), "Technology not found: Tidal Kite");

        let err = CatalogError::RankNotFound {
            building_type: "Cottage".to_string(),
            rank: 9,
        };
        assert_eq!(err.to_string(), "No ranking entry #9 for Cottage");
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: CatalogError = toml_err.into();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
