//! Trie index over normalized food names.
//!
//! Every node keeps a bounded list of the records whose key passes through it,
//! so a prefix lookup is a single walk with no subtree collection. Once a node
//! holds [`MAX_RECORDS_PER_NODE`] records it stops accepting more: the lists
//! are biased toward earlier inserts and prefix results are not exhaustive
//! beyond that bound.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nutrion_search::{CatalogRecord, NameSearchIndex};
//!
//! let mut index = NameSearchIndex::new();
//! let apple = Arc::new(CatalogRecord::new("Manzana", 36.0, 14.0, 52.0));
//! index.insert(&apple.name, Arc::clone(&apple));
//!
//! assert_eq!(index.search_prefix("manz").len(), 1);
//! assert_eq!(index.fuzzy_search("mazana", 1).len(), 1);
//! ```

use crate::normalize;
use crate::record::CatalogRecord;
use crate::relevance::calculate_relevance;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

/// Maximum records kept per node.
pub const MAX_RECORDS_PER_NODE: usize = 200;

/// Default result limit for [`NameSearchIndex::intelligent_search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Default result limit for [`NameSearchIndex::suggestions`].
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Queries whose normalized length is at most this skip the fuzzy stage.
const FUZZY_MIN_QUERY_LEN: usize = 3;

/// A trie node keyed by one normalized character.
#[derive(Debug, Default)]
pub(crate) struct IndexNode {
    children: IndexMap<char, IndexNode>,
    records: Vec<Arc<CatalogRecord>>,
    is_terminal: bool,
}

impl IndexNode {
    /// Records reachable through this node, capped at [`MAX_RECORDS_PER_NODE`].
    fn records(&self) -> &[Arc<CatalogRecord>] {
        &self.records
    }

    fn child(&self, c: char) -> Option<&IndexNode> {
        self.children.get(&c)
    }

    fn push_record(&mut self, record: &Arc<CatalogRecord>) {
        if self.records.len() < MAX_RECORDS_PER_NODE {
            self.records.push(Arc::clone(record));
        }
    }
}

/// Diagnostic counters from a full traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Nodes including the root
    pub total_nodes: usize,
    /// Sum of per-node record list lengths; records count once per node they pass through
    pub total_records: usize,
    /// Longest root-to-node path
    pub max_depth: usize,
    /// Nodes where an inserted key ends, i.e. distinct keys
    pub terminal_nodes: usize,
    /// Per-node record cap in effect
    pub max_records_per_node: usize,
}

/// Prefix, substring and fuzzy search over catalog names.
///
/// Not internally synchronized. The owner clears and reinserts as one unit
/// whenever its record set changes, since there is no targeted delete.
#[derive(Debug, Default)]
pub struct NameSearchIndex {
    root: IndexNode,
}

impl NameSearchIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing has been inserted since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Index `record` under the normalized form of `name`.
    ///
    /// Every node stepped into along the key gets the record appended unless it
    /// is already full. A name that normalizes to the empty string adds nothing.
    pub fn insert(&mut self, name: &str, record: Arc<CatalogRecord>) {
        let key = normalize(name);
        let mut node = &mut self.root;

        for c in key.chars() {
            node = node.children.entry(c).or_default();
            node.push_record(&record);
        }

        node.is_terminal = true;
    }

    /// Records whose key starts with the normalized `prefix`, in insertion order.
    ///
    /// Returns at most [`MAX_RECORDS_PER_NODE`] records; an empty prefix or a
    /// path that does not exist returns nothing.
    pub fn search_prefix(&self, prefix: &str) -> Vec<Arc<CatalogRecord>> {
        let key = normalize(prefix);
        if key.is_empty() {
            return Vec::new();
        }

        self.find_node(&key)
            .map(|node| node.records().to_vec())
            .unwrap_or_default()
    }

    /// Records whose normalized name contains the normalized `query` anywhere.
    ///
    /// Scans every record in the trie on each call. A query that normalizes to
    /// the empty string is contained in every name and matches everything.
    pub fn partial_search(&self, query: &str) -> Vec<Arc<CatalogRecord>> {
        let key = normalize(query);

        self.all_records()
            .into_iter()
            .filter(|record| record.key().contains(&key))
            .collect()
    }

    /// Records whose key has a prefix within `max_edit_distance` edits of the query.
    ///
    /// Results are deduplicated by record; their order carries no meaning.
    pub fn fuzzy_search(&self, query: &str, max_edit_distance: usize) -> Vec<Arc<CatalogRecord>> {
        let query: Vec<char> = normalize(query).chars().collect();
        let mut hits = FuzzyHits::default();

        fuzzy_walk(&self.root, &query, 0, max_edit_distance, &mut hits);

        hits.records
    }

    /// Prefix, then substring, then fuzzy results, deduplicated by name.
    ///
    /// Results keep the order in which each stage found them. The fuzzy stage
    /// only runs for queries longer than three normalized characters. Blank
    /// queries return nothing; punctuation-only queries normalize to the empty
    /// key and fall through to the substring stage.
    pub fn intelligent_search(&self, query: &str, limit: usize) -> Vec<Arc<CatalogRecord>> {
        if query.trim().is_empty() || limit == 0 {
            return Vec::new();
        }

        let key = normalize(query);

        let mut results: IndexMap<String, Arc<CatalogRecord>> = IndexMap::new();

        for record in self.search_prefix(&key).into_iter().take(limit) {
            results.entry(record.name.clone()).or_insert(record);
        }

        if results.len() < limit {
            merge_new(&mut results, self.partial_search(&key), limit);
        }

        if results.len() < limit && key.chars().count() > FUZZY_MIN_QUERY_LEN {
            merge_new(&mut results, self.fuzzy_search(&key, 1), limit);
        }

        results.into_values().take(limit).collect()
    }

    /// Combined search results re-ranked by [`calculate_relevance`].
    ///
    /// Pulls `limit * 2` candidates, sorts prefix matches ahead of substring
    /// matches ahead of the rest, and keeps the best `limit`.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<Arc<CatalogRecord>> {
        let mut results = self.intelligent_search(query, limit.saturating_mul(2));
        results.sort_by_cached_key(|record| Reverse(calculate_relevance(&record.name, query)));
        results.truncate(limit);
        results
    }

    /// Drop every node and record.
    pub fn clear(&mut self) {
        self.root = IndexNode::default();
    }

    /// Node count, record reference count and depth from a full traversal.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            total_nodes: 0,
            total_records: 0,
            max_depth: 0,
            terminal_nodes: 0,
            max_records_per_node: MAX_RECORDS_PER_NODE,
        };
        collect_stats(&self.root, 0, &mut stats);
        stats
    }

    fn find_node(&self, key: &str) -> Option<&IndexNode> {
        key.chars().try_fold(&self.root, |node, c| node.child(c))
    }

    /// Every record in the trie, first occurrence per name, pre-order.
    fn all_records(&self) -> Vec<Arc<CatalogRecord>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        collect_records(&self.root, &mut seen, &mut out);
        out
    }
}

fn merge_new(
    results: &mut IndexMap<String, Arc<CatalogRecord>>,
    candidates: Vec<Arc<CatalogRecord>>,
    limit: usize,
) {
    for record in candidates {
        if results.len() >= limit {
            break;
        }
        if !results.contains_key(&record.name) {
            results.insert(record.name.clone(), record);
        }
    }
}

fn collect_records<'a>(
    node: &'a IndexNode,
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<Arc<CatalogRecord>>,
) {
    for record in &node.records {
        if seen.insert(record.name.as_str()) {
            out.push(Arc::clone(record));
        }
    }
    for child in node.children.values() {
        collect_records(child, seen, out);
    }
}

fn collect_stats(node: &IndexNode, depth: usize, stats: &mut IndexStats) {
    stats.total_nodes += 1;
    stats.total_records += node.records.len();
    stats.max_depth = stats.max_depth.max(depth);
    if node.is_terminal {
        stats.terminal_nodes += 1;
    }

    for child in node.children.values() {
        collect_stats(child, depth + 1, stats);
    }
}

#[derive(Default)]
struct FuzzyHits {
    seen: HashSet<*const CatalogRecord>,
    records: Vec<Arc<CatalogRecord>>,
}

impl FuzzyHits {
    fn add_all(&mut self, records: &[Arc<CatalogRecord>]) {
        for record in records {
            if self.seen.insert(Arc::as_ptr(record)) {
                self.records.push(Arc::clone(record));
            }
        }
    }
}

/// Walk the trie in step with `query[pos..]` with `budget` edits left.
///
/// Each call either advances `pos` or spends budget, so recursion depth is
/// bounded by the query length plus the budget.
fn fuzzy_walk(node: &IndexNode, query: &[char], pos: usize, budget: usize, hits: &mut FuzzyHits) {
    let Some(&target) = query.get(pos) else {
        hits.add_all(&node.records);
        return;
    };

    // match
    if let Some(child) = node.children.get(&target) {
        fuzzy_walk(child, query, pos + 1, budget, hits);
    }

    if budget == 0 {
        return;
    }

    // substitution
    for (_, child) in node.children.iter().filter(|&(&c, _)| c != target) {
        fuzzy_walk(child, query, pos + 1, budget - 1, hits);
    }

    // insertion: the query has an extra character
    fuzzy_walk(node, query, pos + 1, budget - 1, hits);

    // deletion: the key has an extra character
    for child in node.children.values() {
        fuzzy_walk(child, query, pos, budget - 1, hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix_edit_distance;
    use proptest::prelude::*;

    fn record(name: &str) -> Arc<CatalogRecord> {
        Arc::new(CatalogRecord::new(name, 50.0, 10.0, 100.0))
    }

    fn index_of(names: &[&str]) -> NameSearchIndex {
        let mut index = NameSearchIndex::new();
        for name in names {
            index.insert(name, record(name));
        }
        index
    }

    fn names(records: &[Arc<CatalogRecord>]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_insertion_order() {
        let index = index_of(&["Pan blanco", "Pan integral", "Patata cocida"]);
        assert_eq!(names(&index.search_prefix("pan")), vec!["Pan blanco", "Pan integral"]);
        assert_eq!(names(&index.search_prefix("PA")).len(), 3);
    }

    #[test]
    fn test_prefix_accent_insensitive() {
        let index = index_of(&["Salmón", "Piña"]);
        assert_eq!(names(&index.search_prefix("salmon")), vec!["Salmón"]);
        assert_eq!(names(&index.search_prefix("PIÑ")), vec!["Piña"]);
    }

    #[test]
    fn test_prefix_missing_path_and_empty() {
        let index = index_of(&["Pan blanco"]);
        assert!(index.search_prefix("pez").is_empty());
        assert!(index.search_prefix("").is_empty());
        assert!(index.search_prefix("?!").is_empty());
    }

    #[test]
    fn test_insert_marks_terminal() {
        let index = index_of(&["Pan", "Pan blanco"]);
        let pan = index.find_node("pan").unwrap();
        assert!(pan.is_terminal);
        assert!(!index.find_node("pa").unwrap().is_terminal);
        assert_eq!(pan.records().len(), 2);
    }

    #[test]
    fn test_blank_name_adds_nothing() {
        let mut index = NameSearchIndex::new();
        index.insert("  ¡! ", record("  ¡! "));
        assert!(index.is_empty());
        assert_eq!(index.stats().total_nodes, 1);
    }

    #[test]
    fn test_node_cap() {
        let mut index = NameSearchIndex::new();
        for i in 0..(MAX_RECORDS_PER_NODE + 50) {
            let name = format!("Pan {i:03}");
            index.insert(&name, record(&name));
        }

        let results = index.search_prefix("pan");
        assert_eq!(results.len(), MAX_RECORDS_PER_NODE);
        assert_eq!(results[0].name, "Pan 000");

        // later records are still reachable through their own deeper nodes
        assert_eq!(names(&index.search_prefix("pan 249")), vec!["Pan 249"]);
    }

    #[test]
    fn test_partial_search_substring() {
        let index = index_of(&["Pan blanco", "Pan integral", "Patata cocida"]);
        assert_eq!(names(&index.partial_search("tata")), vec!["Patata cocida"]);
        assert_eq!(names(&index.partial_search("BLANC")), vec!["Pan blanco"]);
    }

    #[test]
    fn test_partial_search_empty_key_matches_all() {
        let index = index_of(&["Pan blanco", "Pan integral", "Patata cocida"]);
        assert_eq!(index.partial_search("?!").len(), 3);
        assert_eq!(index.partial_search("").len(), 3);
        assert!(NameSearchIndex::new().partial_search("").is_empty());
    }

    #[test]
    fn test_partial_search_dedups_by_name() {
        let index = index_of(&["Arroz blanco cocido", "Arroz integral cocido"]);
        assert_eq!(
            names(&index.partial_search("cocido")),
            vec!["Arroz blanco cocido", "Arroz integral cocido"]
        );
    }

    #[test]
    fn test_fuzzy_edits() {
        let index = index_of(&["Manzana", "Pera", "Kiwi"]);
        // deletion from the key
        assert_eq!(names(&index.fuzzy_search("mazana", 1)), vec!["Manzana"]);
        // substitution
        assert_eq!(names(&index.fuzzy_search("pena", 1)), vec!["Pera"]);
        // insertion in the query
        assert_eq!(names(&index.fuzzy_search("kiwwi", 1)), vec!["Kiwi"]);
        assert!(index.fuzzy_search("xyzw", 1).is_empty());
    }

    #[test]
    fn test_fuzzy_zero_budget_is_prefix() {
        let index = index_of(&["Manzana", "Mango"]);
        assert_eq!(names(&index.fuzzy_search("man", 0)), vec!["Manzana", "Mango"]);
        assert!(index.fuzzy_search("mazana", 0).is_empty());
    }

    #[test]
    fn test_fuzzy_dedups() {
        let index = index_of(&["Pan", "Pan blanco"]);
        let results = index.fuzzy_search("pan", 1);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_intelligent_empty_query() {
        let index = index_of(&["Pan blanco"]);
        assert!(index.intelligent_search("", 10).is_empty());
        assert!(index.intelligent_search("   ", 10).is_empty());
        assert!(index.intelligent_search("pan", 0).is_empty());
    }

    #[test]
    fn test_intelligent_punctuation_query_uses_substring_stage() {
        let index = index_of(&["Pan blanco", "Pan integral", "Patata cocida"]);
        assert_eq!(
            names(&index.intelligent_search("!!!", 10)),
            vec!["Pan blanco", "Pan integral", "Patata cocida"]
        );
        assert_eq!(names(&index.intelligent_search("¿?", 2)), vec!["Pan blanco", "Pan integral"]);
    }

    #[test]
    fn test_intelligent_short_query_skips_fuzzy() {
        let index = index_of(&["Pan blanco", "Pan integral", "Patata cocida"]);
        assert!(index.intelligent_search("pn", 10).is_empty());
    }

    #[test]
    fn test_intelligent_stage_order() {
        let index = index_of(&["Zumo manzana", "Manzana", "Mermelada"]);
        // prefix first, then substring
        assert_eq!(names(&index.intelligent_search("manz", 10)), vec!["Manzana", "Zumo manzana"]);
    }

    #[test]
    fn test_intelligent_fuzzy_fallback() {
        let index = index_of(&["Manzana", "Pera"]);
        assert_eq!(names(&index.intelligent_search("mazana", 10)), vec!["Manzana"]);
    }

    #[test]
    fn test_intelligent_limit() {
        let index = index_of(&["Pan blanco", "Pan integral", "Pan centeno", "Pan pita"]);
        assert_eq!(index.intelligent_search("pan", 2).len(), 2);
    }

    #[test]
    fn test_suggestions_prefix_beats_substring() {
        let index = index_of(&["Mermelada de manzana", "Manzana"]);
        let ranked = index.suggestions("manz", 5);
        assert_eq!(names(&ranked), vec!["Manzana", "Mermelada de manzana"]);
    }

    #[test]
    fn test_suggestions_limit() {
        let index = index_of(&["Pan blanco", "Pan integral", "Pan centeno"]);
        assert_eq!(index.suggestions("pan", 2).len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut index = index_of(&["Pan blanco", "Manzana"]);
        index.clear();
        assert!(index.is_empty());
        assert!(index.search_prefix("pan").is_empty());
        assert!(index.partial_search("anza").is_empty());
        assert!(index.fuzzy_search("mazana", 1).is_empty());
        assert_eq!(index.stats().total_nodes, 1);
    }

    #[test]
    fn test_stats() {
        let index = index_of(&["Pan", "Pez"]);
        let stats = index.stats();
        // root, p, a, n, e, z
        assert_eq!(stats.total_nodes, 6);
        // p holds both, then one per remaining node
        assert_eq!(stats.total_records, 6);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.terminal_nodes, 2);
        assert_eq!(stats.max_records_per_node, MAX_RECORDS_PER_NODE);
    }

    proptest! {
        #[test]
        fn prop_inserted_names_found_by_prefix(
            names in prop::collection::hash_set("[a-z][a-z ]{0,11}", 1..60)
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let mut index = NameSearchIndex::new();
            for name in &names {
                index.insert(name, record(name));
            }
            for name in &names {
                let hits = index.search_prefix(name);
                prop_assert!(hits.iter().any(|r| &r.name == name));
            }
        }

        #[test]
        fn prop_fuzzy_hits_within_distance(
            names in prop::collection::vec("[a-e]{1,8}", 1..30),
            query in "[a-e]{1,6}",
        ) {
            let mut index = NameSearchIndex::new();
            for name in &names {
                index.insert(name, record(name));
            }
            for hit in index.fuzzy_search(&query, 1) {
                prop_assert!(prefix_edit_distance(&hit.key(), &query) <= 1);
            }
        }

        #[test]
        fn prop_intelligent_respects_limit(
            names in prop::collection::vec("[a-c]{1,6}", 0..40),
            query in "[a-c]{0,5}",
            limit in 0usize..20,
        ) {
            let mut index = NameSearchIndex::new();
            for name in &names {
                index.insert(name, record(name));
            }
            let results = index.intelligent_search(&query, limit);
            prop_assert!(results.len() <= limit);
            let unique: HashSet<&str> = results.iter().map(|r| r.name.as_str()).collect();
            prop_assert_eq!(unique.len(), results.len());
        }
    }
}
