//! Term extraction: text normalization, salient terms, and the FTS5 term
//! expression built from them.

use quarry_core::constants::{is_stop_word, MIN_TERM_LEN};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercase, decompose (NFD), drop combining marks, turn punctuation into
/// spaces, and collapse whitespace runs.
///
/// Applied to both queries and chunk content so word and phrase matching
/// compare like with like.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Distinct non-stop-word terms of at least `MIN_TERM_LEN` characters, in
/// query order.
pub fn salient_terms(query: &str) -> Vec<String> {
    let normalized = normalize(query);
    let mut terms: Vec<String> = Vec::new();
    for word in normalized.unicode_words() {
        if word.chars().count() < MIN_TERM_LEN || is_stop_word(word) {
            continue;
        }
        if !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}

/// FTS5 MATCH expression: every salient term as a quoted prefix query,
/// joined with `OR`. Empty when the query has no salient terms.
pub fn lexical_expression(query: &str) -> String {
    salient_terms(query)
        .iter()
        .map(|term| format!("\"{term}\"*"))
        .collect::<Vec<_>>()
        .join(" OR ")
}
