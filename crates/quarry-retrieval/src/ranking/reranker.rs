//! Term-overlap reranking.
//!
//! Fused or single-signal order is corrected by how many salient query terms
//! each candidate actually contains. Nothing is filtered out: candidates with
//! no matching terms sink below those with some, but stay in the list.

use quarry_core::config::RetrievalConfig;
use quarry_core::models::RankedCandidate;
use regex::Regex;

use crate::query::{normalize, salient_terms};

/// Weights of the composite rerank score:
///
/// `match_ratio * match_weight + clamp(signal_score, 0, 1) * signal_weight`,
/// plus `phrase_bonus` when the whole normalized query appears verbatim.
///
/// The weights assume the signal score is normalized to [0, 1]; it is clamped
/// here, so the signal term never exceeds `signal_weight`. With the defaults
/// (10.0 and 0.1) one extra matched term out of `n` is worth `10 / n`, which
/// outweighs any signal difference for queries of fewer than 100 terms. The
/// signal then only orders candidates with equal match ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankWeights {
    pub match_weight: f64,
    pub signal_weight: f64,
    pub phrase_bonus: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for RerankWeights {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            match_weight: config.match_weight,
            signal_weight: config.signal_weight,
            phrase_bonus: config.phrase_bonus,
        }
    }
}

/// A candidate with its rerank score.
#[derive(Debug, Clone)]
pub struct RerankedCandidate {
    pub candidate: RankedCandidate,
    /// Composite score (higher = more relevant).
    pub score: f64,
    /// Fraction of salient query terms found in the content.
    pub match_ratio: f64,
    pub phrase_match: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Reranker {
    weights: RerankWeights,
}

impl Reranker {
    pub fn new(weights: RerankWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> RerankWeights {
        self.weights
    }

    /// Score every candidate, sort descending (stable), and keep `cap`.
    pub fn rerank(
        &self,
        query: &str,
        candidates: Vec<RankedCandidate>,
        cap: usize,
    ) -> Vec<RerankedCandidate> {
        let terms = salient_terms(query);
        // Terms are alphanumeric after normalization; a pattern that still
        // fails to compile simply never matches.
        let patterns: Vec<Regex> = terms
            .iter()
            .filter_map(|t| Regex::new(&format!(r"\b{}\b", regex::escape(t))).ok())
            .collect();
        let phrase = normalize(query);

        let mut scored: Vec<RerankedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let content = normalize(&candidate.content);
                let matched = patterns.iter().filter(|p| p.is_match(&content)).count();
                let match_ratio = if terms.is_empty() {
                    0.0
                } else {
                    matched as f64 / terms.len() as f64
                };
                let phrase_match = !phrase.is_empty() && content.contains(&phrase);
                let score = self.composite(match_ratio, candidate.signal_score, phrase_match);
                RerankedCandidate {
                    candidate,
                    score,
                    match_ratio,
                    phrase_match,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(cap);
        scored
    }

    fn composite(&self, match_ratio: f64, signal_score: f64, phrase_match: bool) -> f64 {
        let w = &self.weights;
        let bonus = if phrase_match { w.phrase_bonus } else { 0.0 };
        match_ratio * w.match_weight + signal_score.clamp(0.0, 1.0) * w.signal_weight + bonus
    }
}
