//! Food-name search for Nutrion.
//!
//! This crate provides:
//! - Accent- and case-insensitive key normalization
//! - A trie index with prefix, substring and bounded-edit fuzzy lookup
//! - Combined ranked search and relevance-sorted suggestions
//! - A catalog layer that owns the records and rebuilds the index on change
//!
//! # Example
//!
//! ```
//! use nutrion_search::{Catalog, SeedCatalog};
//!
//! let catalog = Catalog::from_source(&SeedCatalog).unwrap();
//! let hits = catalog.search("manzana");
//! assert_eq!(hits[0].name, "Manzana");
//! ```

mod catalog;
mod config;
mod error;
mod fuzzy;
mod index;
mod normalize;
mod record;
mod relevance;
mod seed;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{Catalog, CatalogSource, JsonFileCatalog};
pub use config::{SearchConfig, MAX_FUZZY_DISTANCE};
pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::prefix_edit_distance;
pub use index::{
    IndexStats, NameSearchIndex, DEFAULT_SEARCH_LIMIT, DEFAULT_SUGGESTION_LIMIT,
    MAX_RECORDS_PER_NODE,
};
pub use normalize::normalize;
pub use record::CatalogRecord;
pub use relevance::{calculate_relevance, RelevanceScore};
pub use seed::SeedCatalog;
