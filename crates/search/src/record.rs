//! Catalog records.

use crate::normalize;
use serde::{Deserialize, Serialize};

/// A food in the catalog with its per-100g nutritional constants.
///
/// Identity is the exact `name`; two records whose names normalize to the
/// same key are still different records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Display name
    pub name: String,
    /// Glycemic index (0-100+)
    #[serde(rename = "gi")]
    pub glycemic_index: f64,
    /// Carbohydrates per 100 g
    #[serde(rename = "carbs")]
    pub carbs_per_100: f64,
    /// Calories per 100 g
    #[serde(rename = "kcal")]
    pub kcal_per_100: f64,
    /// Density in g/ml, only for liquids
    #[serde(rename = "density", default, skip_serializing_if = "Option::is_none")]
    pub density_g_per_ml: Option<f64>,
}

impl CatalogRecord {
    /// Creates a record without density.
    pub fn new(name: impl Into<String>, glycemic_index: f64, carbs_per_100: f64, kcal_per_100: f64) -> Self {
        Self {
            name: name.into(),
            glycemic_index,
            carbs_per_100,
            kcal_per_100,
            density_g_per_ml: None,
        }
    }

    /// Sets the density for liquids.
    #[must_use]
    pub fn with_density(mut self, density_g_per_ml: f64) -> Self {
        self.density_g_per_ml = Some(density_g_per_ml);
        self
    }

    /// The search key this record is indexed under.
    #[inline]
    pub fn key(&self) -> String {
        normalize(&self.name)
    }

    /// Returns true if the record is measured by volume.
    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.density_g_per_ml.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_field_names() {
        let record: CatalogRecord =
            serde_json::from_str(r#"{"name":"Leche entera","gi":41,"carbs":5,"kcal":61,"density":1.03}"#).unwrap();
        assert_eq!(record.glycemic_index, 41.0);
        assert_eq!(record.density_g_per_ml, Some(1.03));
        assert!(record.is_liquid());
    }

    #[test]
    fn test_density_omitted_when_absent() {
        let json = serde_json::to_string(&CatalogRecord::new("Manzana", 36.0, 14.0, 52.0)).unwrap();
        assert!(!json.contains("density"));
    }

    #[test]
    fn test_key() {
        assert_eq!(CatalogRecord::new("Salmón", 0.0, 0.0, 208.0).key(), "salmon");
    }
}
