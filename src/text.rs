//! Tokenization and shared text utilities.
//!
//! All lexical stages (persona profile construction, scoring, refinement)
//! tokenize through this module so that stop-word handling and Unicode
//! normalization stay consistent across the pipeline.

use unicode_normalization::UnicodeNormalization;

/// Fixed English stop-word set shared by every lexical stage.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "for",
    "from", "had", "has", "have", "in", "into", "is", "it", "its", "of", "on",
    "or", "our", "that", "the", "their", "this", "to", "was", "were", "will",
    "with", "you", "your",
];

/// Check whether a lowercase token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Normalize a term for comparison: NFC form, lowercase, trimmed of
/// surrounding punctuation.
pub fn normalize_term(term: &str) -> String {
    let nfc: String = term.nfc().collect();
    nfc.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Tokenize text into lowercase word forms, discarding stop words and
/// empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .map(normalize_term)
        .filter(|t| !t.is_empty() && !is_stop_word(t))
        .collect()
}

/// Tokenize keeping only tokens longer than `min_len` characters.
///
/// The task-alignment stages ignore very short tokens, which carry little
/// signal in English text.
pub fn tokenize_min_len(text: &str, min_len: usize) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > min_len)
        .collect()
}

/// Case-insensitive substring containment on normalized text.
pub fn contains_term(haystack_lower: &str, term: &str) -> bool {
    let term = term.to_lowercase();
    !term.is_empty() && haystack_lower.contains(&term)
}

/// Truncate a string to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
