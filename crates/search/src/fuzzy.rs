//! Edit-distance helpers.

/// Smallest edit distance between `query` and any prefix of `text`.
///
/// This is the distance the trie fuzzy walk bounds: a record is reachable
/// within `k` edits when some prefix of its key is within `k` of the query.
///
/// # Example
/// ```
/// use nutrion_search::prefix_edit_distance;
///
/// assert_eq!(prefix_edit_distance("manzana", "manz"), 0);
/// assert_eq!(prefix_edit_distance("manzana", "mazana"), 1);
/// ```
pub fn prefix_edit_distance(text: &str, query: &str) -> usize {
    let text_chars: Vec<char> = text.chars().collect();
    let query_chars: Vec<char> = query.chars().collect();

    // Rows walk the query, columns the text; row m column j is the distance
    // between the whole query and text[..j].
    let n = text_chars.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (i, &qc) in query_chars.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = usize::from(qc != text_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.into_iter().min().unwrap_or(0)
}
