use quarry_core::config::ChunkingConfig;
use quarry_core::{QuarryError, QuarryResult};

use crate::separators::{split_paragraphs, Separator};
use crate::stride;

/// Splits text into chunks of at most `max_size` characters.
///
/// Paragraph breaks always end a chunk. Inside a paragraph, lines, then
/// sentences, then words are greedily packed; a word longer than `max_size`
/// is sliced with stride `max_size - overlap`.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_size: usize,
    overlap: usize,
}

impl Chunker {
    pub fn new(config: &ChunkingConfig) -> QuarryResult<Self> {
        Self::with_sizes(config.max_chunk_size, config.chunk_overlap)
    }

    pub fn with_sizes(max_size: usize, overlap: usize) -> QuarryResult<Self> {
        if max_size == 0 {
            return Err(QuarryError::ConfigError(
                "chunk size must be greater than zero".into(),
            ));
        }
        if overlap >= max_size {
            return Err(QuarryError::ConfigError(format!(
                "chunk overlap ({overlap}) must be smaller than chunk size ({max_size})"
            )));
        }
        Ok(Self { max_size, overlap })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk `text`. Every chunk is trimmed and non-empty; order follows the source.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for paragraph in split_paragraphs(text) {
            self.split_level(paragraph, Some(Separator::Line), &mut out);
        }
        out
    }

    fn split_level(&self, text: &str, level: Option<Separator>, out: &mut Vec<String>) {
        if char_len(text.trim()) <= self.max_size {
            push_trimmed(text, out);
            return;
        }

        let Some(separator) = level else {
            tracing::debug!(
                segment_len = char_len(text),
                max_size = self.max_size,
                "segment has no separator left, slicing with fixed stride"
            );
            out.extend(stride::slice(text, self.max_size, self.overlap));
            return;
        };

        let mut buffer = String::new();
        for segment in separator.split(text) {
            if char_len(segment.trim()) > self.max_size {
                push_trimmed(&buffer, out);
                buffer.clear();
                self.split_level(segment, separator.finer(), out);
                continue;
            }

            let candidate = format!("{buffer}{segment}");
            if char_len(candidate.trim()) > self.max_size {
                push_trimmed(&buffer, out);
                buffer = segment.to_string();
            } else {
                buffer = candidate;
            }
        }
        push_trimmed(&buffer, out);
    }
}

impl Default for Chunker {
    fn default() -> Self {
        let config = ChunkingConfig::default();
        Self {
            max_size: config.max_chunk_size,
            overlap: config.chunk_overlap,
        }
    }
}

/// Convenience wrapper: validate the sizes and chunk `text` in one call.
pub fn chunk(text: &str, max_size: usize, overlap: usize) -> QuarryResult<Vec<String>> {
    Ok(Chunker::with_sizes(max_size, overlap)?.chunk(text))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn push_trimmed(text: &str, out: &mut Vec<String>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}
