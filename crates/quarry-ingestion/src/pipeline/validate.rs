//! Stage 1: reject text that cannot produce a chunk.

use quarry_core::{QuarryError, QuarryResult};

pub fn validate(raw_text: &str, source: &str) -> QuarryResult<()> {
    if source.trim().is_empty() {
        return Err(QuarryError::InputError {
            reason: "source filename is empty".into(),
        });
    }
    if raw_text.trim().is_empty() {
        return Err(QuarryError::InputError {
            reason: "document text is empty".into(),
        });
    }
    // Extraction failures tend to leave only replacement or control characters.
    if !raw_text.chars().any(char::is_alphanumeric) {
        return Err(QuarryError::InputError {
            reason: "document has no extractable text".into(),
        });
    }
    Ok(())
}

/// blake3 hex digest of the raw text.
pub fn content_hash(raw_text: &str) -> String {
    blake3::hash(raw_text.as_bytes()).to_hex().to_string()
}
