//! Relevance scoring for suggestions.

use crate::normalize;

/// Relevance score levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelevanceScore {
    /// Neither prefix nor substring; scored by length similarity below this
    LengthSimilarity = 25,
    /// Contains the query
    Contains = 50,
    /// Starts with the query
    StartsWith = 100,
}

/// Calculate relevance score for a record name against a query.
///
/// Prefix and substring checks run on normalized text. Everything else
/// scores by how close the raw lengths are: `max(0, 25 - |len(name) - len(query)|)`.
///
/// # Arguments
/// * `name` - The record name to score
/// * `query` - The search query
///
/// # Returns
/// Relevance score (higher is better, 0-100)
pub fn calculate_relevance(name: &str, query: &str) -> u32 {
    let name_key = normalize(name);
    let query_key = normalize(query);

    if name_key.starts_with(&query_key) {
        return RelevanceScore::StartsWith as u32;
    }

    if name_key.contains(&query_key) {
        return RelevanceScore::Contains as u32;
    }

    let diff = name.chars().count().abs_diff(query.chars().count());
    (RelevanceScore::LengthSimilarity as u32).saturating_sub(u32::try_from(diff).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with() {
        assert_eq!(calculate_relevance("Manzana", "manz"), RelevanceScore::StartsWith as u32);
    }

    #[test]
    fn test_starts_with_ignores_accents() {
        assert_eq!(calculate_relevance("Salmón", "SALMON"), RelevanceScore::StartsWith as u32);
    }

    #[test]
    fn test_contains() {
        assert_eq!(
            calculate_relevance("Mermelada de manzana", "manz"),
            RelevanceScore::Contains as u32
        );
    }

    #[test]
    fn test_length_similarity() {
        // "Manzana" vs "mazana": 7 - 6 chars
        assert_eq!(calculate_relevance("Manzana", "mazana"), 24);
    }

    #[test]
    fn test_length_similarity_floor() {
        assert_eq!(calculate_relevance("Berenjena parmigiana con queso fundido", "xyz"), 0);
    }
}
