//! Fixed-stride slicing for segments no separator can shrink.

/// Slice `text` into windows of `max_size` characters advancing by
/// `max_size - overlap` (at least 1). The last window ends at the end of
/// the text. Windows are trimmed; empty ones are dropped.
pub fn slice(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let max_size = max_size.max(1);
    let stride = max_size.saturating_sub(overlap).max(1);

    let mut out = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + max_size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
        if end == chars.len() {
            break;
        }
        start += stride;
    }
    out
}
