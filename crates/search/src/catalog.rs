//! Catalog ownership and index lifecycle.
//!
//! [`Catalog`] owns the records and the [`NameSearchIndex`] built from them.
//! The index has no targeted delete, so any change that removes or replaces a
//! record clears it and reinserts every surviving record in catalog order.
//! Adding a new name is the one incremental path.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::NameSearchIndex;
use crate::normalize;
use crate::record::CatalogRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Anything that can produce catalog records at load time.
pub trait CatalogSource {
    /// Produce every record of this source.
    fn records(&self) -> Result<Vec<CatalogRecord>>;
}

impl CatalogSource for Vec<CatalogRecord> {
    fn records(&self) -> Result<Vec<CatalogRecord>> {
        Ok(self.clone())
    }
}

/// A JSON array of records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Source reading `path` on every load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    fn records(&self) -> Result<Vec<CatalogRecord>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| SearchError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            SearchError::Catalog(format!("{} is not a JSON array of foods: {e}", self.path.display()))
        })
    }
}

/// The in-memory food catalog and its search index.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<Arc<CatalogRecord>>,
    index: NameSearchIndex,
    config: SearchConfig,
}

impl Catalog {
    /// Creates an empty catalog with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with the given limits.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates a catalog holding every record of `source`.
    pub fn from_source(source: &impl CatalogSource) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.load(source)?;
        Ok(catalog)
    }

    /// Replace all records with those of `source` and rebuild the index.
    ///
    /// Records with blank names are skipped; a repeated name keeps the later
    /// record at the earlier position. On error the catalog is left unchanged.
    /// Returns the number of records held afterwards.
    pub fn load(&mut self, source: &impl CatalogSource) -> Result<usize> {
        let incoming = source.records()?;
        self.records.clear();
        self.merge(incoming);
        self.rebuild();

        info!(records = self.records.len(), "Catalog loaded");
        Ok(self.records.len())
    }

    /// Merge the records of `source` over the current ones and rebuild.
    ///
    /// Returns the number of records taken from the source.
    pub fn extend(&mut self, source: &impl CatalogSource) -> Result<usize> {
        let incoming = source.records()?;
        let taken = self.merge(incoming);
        self.rebuild();

        info!(taken, records = self.records.len(), "Catalog extended");
        Ok(taken)
    }

    /// Add a record, or replace the record with the same name.
    ///
    /// A new name is inserted into the index directly; a replacement rebuilds.
    pub fn add(&mut self, record: CatalogRecord) -> Result<()> {
        if normalize(&record.name).is_empty() {
            return Err(SearchError::InvalidRecord(format!(
                "name {:?} has no searchable characters",
                record.name
            )));
        }

        let record = Arc::new(record);
        match self.position(&record.name) {
            Some(pos) => {
                debug!(name = %record.name, "Replacing catalog record");
                self.records[pos] = record;
                self.rebuild();
            }
            None => {
                debug!(name = %record.name, "Adding catalog record");
                self.index.insert(&record.name, Arc::clone(&record));
                self.records.push(record);
            }
        }

        Ok(())
    }

    /// Remove the record with exactly this name and rebuild the index.
    pub fn remove(&mut self, name: &str) -> Option<Arc<CatalogRecord>> {
        let pos = self.position(name)?;
        let removed = self.records.remove(pos);
        self.rebuild();

        debug!(name, "Removed catalog record");
        Some(removed)
    }

    /// Record with exactly this name.
    pub fn get(&self, name: &str) -> Option<&Arc<CatalogRecord>> {
        self.records.iter().find(|r| r.name == name)
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[Arc<CatalogRecord>] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read access to the index.
    pub fn index(&self) -> &NameSearchIndex {
        &self.index
    }

    /// The limits used by [`Catalog::search`] and [`Catalog::suggestions`].
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Clear the index and reinsert every record in catalog order.
    pub fn rebuild(&mut self) {
        self.index.clear();
        for record in &self.records {
            self.index.insert(&record.name, Arc::clone(record));
        }

        debug!(records = self.records.len(), "Search index rebuilt");
    }

    /// Combined search capped at the configured default limit.
    pub fn search(&self, query: &str) -> Vec<Arc<CatalogRecord>> {
        self.index.intelligent_search(query, self.config.default_limit)
    }

    /// Relevance-ranked suggestions capped at the configured suggestion limit.
    pub fn suggestions(&self, query: &str) -> Vec<Arc<CatalogRecord>> {
        self.index.suggestions(query, self.config.suggestion_limit)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    /// Upsert without touching the index; the caller rebuilds.
    fn merge(&mut self, incoming: Vec<CatalogRecord>) -> usize {
        let mut taken = 0;
        for record in incoming {
            if normalize(&record.name).is_empty() {
                warn!(name = %record.name, "Skipping record without a searchable name");
                continue;
            }

            match self.position(&record.name) {
                Some(pos) => self.records[pos] = Arc::new(record),
                None => self.records.push(Arc::new(record)),
            }
            taken += 1;
        }
        taken
    }
}
