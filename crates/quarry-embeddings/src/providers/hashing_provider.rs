//! Feature-hashing embedder.
//!
//! Hashes terms into fixed-dimension buckets weighted by term frequency.
//! Deterministic and dependency-free at runtime, so it works air-gapped and
//! doubles as a test backend.

use std::collections::HashMap;

use async_trait::async_trait;
use quarry_core::models::BackendReply;
use quarry_core::traits::IEmbeddingProvider;
use quarry_core::QuarryResult;
use unicode_segmentation::UnicodeSegmentation;

pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket for a term.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.unicode_words()
            .filter(|w| w.chars().count() >= 2)
            .map(str::to_lowercase)
            .collect()
    }

    /// L2-normalized term-frequency vector. Text without terms maps to zeros.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in tf {
            // longer terms carry more signal
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEmbeddingProvider for HashingProvider {
    async fn embed_batch(&self, texts: &[String]) -> QuarryResult<BackendReply> {
        Ok(BackendReply::Embeddings(
            texts.iter().map(|t| self.vectorize(t)).collect(),
        ))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}
