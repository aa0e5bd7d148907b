//! Search-key normalization.

use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block, stripped after canonical decomposition.
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Normalize text into a search key.
///
/// Lowercases, decomposes accented characters (NFD) and drops their combining
/// marks, keeps only ASCII lowercase letters, digits and whitespace, then trims.
/// Total and idempotent: any input yields a key, and normalizing a key again
/// returns it unchanged.
///
/// # Example
/// ```
/// use nutrion_search::normalize;
///
/// assert_eq!(normalize("  Salmón ahumado! "), "salmon ahumado");
/// assert_eq!(normalize("Piña"), "pina");
/// ```
pub fn normalize(text: &str) -> String {
    let key: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .filter(|&c| is_key_char(c))
        .collect();

    key.trim().to_string()
}

#[inline]
fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()
}
