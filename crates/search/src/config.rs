//! Search configuration
//!
//! Loaded from TOML, with every field optional:
//!
//! ```toml
//! default_limit = 50
//! suggestion_limit = 10
//! fuzzy_distance = 1
//! ```

use crate::error::{Result, SearchError};
use crate::index::{DEFAULT_SEARCH_LIMIT, DEFAULT_SUGGESTION_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted edit budget; the fuzzy walk branches on every edit.
pub const MAX_FUZZY_DISTANCE: usize = 3;

/// Result limits and fuzzy tolerance used by the catalog and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum results from a combined search
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Maximum suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Edit budget for explicit fuzzy lookups
    #[serde(default = "default_fuzzy_distance")]
    pub fuzzy_distance: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            suggestion_limit: default_suggestion_limit(),
            fuzzy_distance: default_fuzzy_distance(),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_fuzzy_distance() -> usize {
    1
}

impl SearchConfig {
    /// Load configuration from a file path, a discovered file, or defaults.
    ///
    /// Returns the configuration and the file it came from, if any.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let config = match config_path {
            Some(ref p) => {
                let content = std::fs::read_to_string(p).map_err(|e| SearchError::io(p, e))?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };

        Ok((config, config_path))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every search empty.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(SearchError::Config("default_limit must be at least 1".into()));
        }
        if self.suggestion_limit == 0 {
            return Err(SearchError::Config("suggestion_limit must be at least 1".into()));
        }
        if self.fuzzy_distance > MAX_FUZZY_DISTANCE {
            return Err(SearchError::Config(format!(
                "fuzzy_distance {} is too large, use {MAX_FUZZY_DISTANCE} or less",
                self.fuzzy_distance
            )));
        }
        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".nutrion.toml", "nutrion.toml", ".config/nutrion.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}
