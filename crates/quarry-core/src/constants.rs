/// Quarry version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stop words dropped from both the lexical term expression and reranker terms.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "his", "how", "its", "who", "what", "when", "where",
    "which", "why", "will", "with", "this", "that", "these", "those", "from", "they", "them",
    "then", "than", "there", "their", "into", "onto", "about", "does", "did", "been", "being",
    "were", "would", "could", "should", "some", "such", "also", "just", "only", "over", "very",
    "each", "other", "more", "most", "your", "yours", "she", "him", "may", "might", "must",
    "shall", "upon", "via", "per",
];

/// Terms shorter than this (in characters) are not salient.
pub const MIN_TERM_LEN: usize = 3;

/// Whether `term` (already lowercased) is a stop word.
pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term)
}
