//! Error types for the search crate.
//!
//! The index itself never fails; these errors come from the layers around it
//! (catalog loading, configuration files).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while loading or mutating a catalog.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Record rejected by the catalog
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Catalog source could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration is present but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Error code for programmatic handling by callers.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Record rejected by the catalog
    InvalidRecord = 11001,
    /// Catalog source could not be loaded
    Catalog = 11002,
    /// Configuration is present but unusable
    Config = 11003,
    /// File could not be read
    Io = 11004,
    /// JSON parsing error
    JsonParsing = 11005,
    /// TOML parsing error
    TomlParsing = 11006,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidRecord(_) => SearchErrorCode::InvalidRecord,
            SearchError::Catalog(_) => SearchErrorCode::Catalog,
            SearchError::Config(_) => SearchErrorCode::Config,
            SearchError::Io { .. } => SearchErrorCode::Io,
            SearchError::Json(_) => SearchErrorCode::JsonParsing,
            SearchError::Toml(_) => SearchErrorCode::TomlParsing,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SearchError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SearchError::InvalidRecord("blank".into()).code(),
            SearchErrorCode::InvalidRecord
        );
        assert_eq!(SearchErrorCode::TomlParsing as u32, 11006);
    }

    #[test]
    fn test_json_error_converts() {
        let err: SearchError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert_eq!(err.code(), SearchErrorCode::JsonParsing);
        assert!(err.to_string().starts_with("JSON parsing error"));
    }
}
