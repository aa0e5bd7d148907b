//! WASM bindings for catalog search.

use crate::{normalize, Catalog, CatalogRecord, SeedCatalog};
use once_cell::sync::Lazy;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// Seed catalog built on first use; empty if the embedded data fails to parse.
static SEED: Lazy<Catalog> = Lazy::new(|| Catalog::from_source(&SeedCatalog).unwrap_or_default());

fn to_json(records: &[Arc<CatalogRecord>]) -> String {
    let records: Vec<&CatalogRecord> = records.iter().map(AsRef::as_ref).collect();
    serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
}

/// Search the built-in catalog.
///
/// # Arguments
/// * `query` - Text typed so far
/// * `limit` - Maximum results (0 for the default of 50)
///
/// # Returns
/// JSON array of food records in result order
#[wasm_bindgen]
pub fn search_catalog(query: &str, limit: usize) -> String {
    let limit = if limit == 0 { crate::DEFAULT_SEARCH_LIMIT } else { limit };
    to_json(&SEED.index().intelligent_search(query, limit))
}

/// Relevance-ranked suggestions from the built-in catalog.
///
/// Returns a JSON array of food records, best first.
#[wasm_bindgen]
pub fn suggest_catalog(query: &str, limit: usize) -> String {
    let limit = if limit == 0 { crate::DEFAULT_SUGGESTION_LIMIT } else { limit };
    to_json(&SEED.index().suggestions(query, limit))
}

/// Normalize a food name the way the index keys it.
#[wasm_bindgen]
pub fn normalize_name(text: &str) -> String {
    normalize(text)
}
