//! Built-in food catalog.

use crate::catalog::CatalogSource;
use crate::error::Result;
use crate::record::CatalogRecord;

const SEED_JSON: &str = include_str!("../data/seed_catalog.json");

/// The catalog shipped with Nutrion: common Spanish foods with glycemic
/// index, carbohydrates and calories per 100 g.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedCatalog;

impl CatalogSource for SeedCatalog {
    fn records(&self) -> Result<Vec<CatalogRecord>> {
        Ok(serde_json::from_str(SEED_JSON)?)
    }
}
