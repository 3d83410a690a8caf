//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i + 1), rank 0-indexed.
//!
//! Combines ranked lists whose raw scores live on unrelated scales. Only
//! positions matter. A chunk found by two or more lists has its fused score
//! multiplied by a boost so that agreement between signals wins over a single
//! strong signal.

use std::collections::HashMap;

use quarry_core::models::{ChunkId, RankedCandidate};

/// Multiplier applied to the fused score of a chunk present in at least two
/// lists.
///
/// With lists of length `n`, the weakest dual-signal chunk scores
/// `boost * 2 / (k + n)` and the strongest single-signal chunk scores
/// `1 / (k + 1)`. At 1.5 the former wins whenever `n <= 2k + 2`, which is
/// 122 for `k = 60`. Tunable through `RetrievalConfig::dual_signal_boost`;
/// `QuarryConfig::validate` rejects a boost, `rrf_k` and `candidate_limit`
/// that break this bound.
pub const DUAL_SIGNAL_BOOST: f64 = 1.5;

/// A candidate after fusion.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    /// The candidate as first seen across the input lists.
    pub candidate: RankedCandidate,
    /// Fused RRF score (higher = more relevant), boost included.
    pub rrf_score: f64,
    /// Labels of the lists the candidate appeared in, in list order.
    pub signals: Vec<String>,
}

impl FusedCandidate {
    pub fn is_multi_signal(&self) -> bool {
        self.signals.len() >= 2
    }
}

/// Contribution of a single list position.
pub fn rrf_contribution(rank: usize, k: u32) -> f64 {
    1.0 / (k as f64 + rank as f64 + 1.0)
}

/// Fuse labelled ranked lists.
///
/// A chunk repeated inside one list only counts at its best position. The
/// output is sorted by fused score descending; ties keep first-seen order,
/// walking the lists in the order given.
pub fn fuse(
    ranked_lists: &[(&str, &[RankedCandidate])],
    k: u32,
    boost: f64,
) -> Vec<FusedCandidate> {
    let mut index: HashMap<ChunkId, usize> = HashMap::new();
    let mut fused: Vec<FusedCandidate> = Vec::new();

    for (label, list) in ranked_lists {
        for (rank, candidate) in list.iter().enumerate() {
            let contribution = rrf_contribution(rank, k);
            match index.get(&candidate.chunk_id) {
                Some(&slot) => {
                    let entry = &mut fused[slot];
                    if entry.signals.iter().any(|s| s == label) {
                        continue;
                    }
                    entry.rrf_score += contribution;
                    entry.signals.push((*label).to_string());
                }
                None => {
                    index.insert(candidate.chunk_id, fused.len());
                    fused.push(FusedCandidate {
                        candidate: candidate.clone(),
                        rrf_score: contribution,
                        signals: vec![(*label).to_string()],
                    });
                }
            }
        }
    }

    for entry in fused.iter_mut().filter(|e| e.is_multi_signal()) {
        entry.rrf_score *= boost;
    }

    // Stable: equal scores stay in first-seen order.
    fused.sort_by(|a, b| {
        b.rrf_score
            .partial_cmp(&a.rrf_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    fused
}

/// Turn fused candidates back into ranked candidates whose signal score is
/// the fused score divided by the pool maximum, so the best chunk gets 1.0.
pub fn into_normalized_candidates(fused: Vec<FusedCandidate>) -> Vec<RankedCandidate> {
    let max = fused.iter().map(|f| f.rrf_score).fold(0.0_f64, f64::max);
    fused
        .into_iter()
        .map(|f| {
            let mut candidate = f.candidate;
            candidate.signal_score = if max > 0.0 { f.rrf_score / max } else { 0.0 };
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(id: ChunkId) -> RankedCandidate {
        RankedCandidate {
            chunk_id: id,
            content: format!("chunk {id}"),
            source_filename: "doc.txt".into(),
            signal_score: 0.5,
        }
    }

    fn ids(fused: &[FusedCandidate]) -> Vec<ChunkId> {
        fused.iter().map(|f| f.candidate.chunk_id).collect()
    }

    #[test]
    fn chunk_in_both_lists_ranks_first() {
        let vector = vec![cand(1), cand(2)];
        let lexical = vec![cand(2), cand(3)];
        let fused = fuse(&[("vector", &vector[..]), ("lexical", &lexical[..])], 60, DUAL_SIGNAL_BOOST);

        assert_eq!(ids(&fused), vec![2, 1, 3]);
        let expected = (1.0 / 62.0 + 1.0 / 61.0) * DUAL_SIGNAL_BOOST;
        assert!((fused[0].rrf_score - expected).abs() < 1e-12);
        assert_eq!(fused[0].signals, vec!["vector", "lexical"]);
    }

    #[test]
    fn contribution_strictly_decreasing() {
        for rank in 0..500 {
            assert!(rrf_contribution(rank, 60) > rrf_contribution(rank + 1, 60));
        }
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let vector = vec![cand(7)];
        let lexical = vec![cand(3)];
        let fused = fuse(&[("vector", &vector[..]), ("lexical", &lexical[..])], 60, DUAL_SIGNAL_BOOST);
        assert_eq!(ids(&fused), vec![7, 3]);
        assert_eq!(fused[0].rrf_score, fused[1].rrf_score);
    }

    #[test]
    fn boost_covers_lists_up_to_two_k_plus_two() {
        let k = 60;
        let n = 2 * k as usize + 2;
        // Chunk 0 is last in both lists; chunks 1.. are single-signal, one of
        // them at rank 0.
        let mut vector: Vec<RankedCandidate> = (1..n as ChunkId).map(cand).collect();
        vector.push(cand(0));
        let mut lexical: Vec<RankedCandidate> = (1000..1000 + n as ChunkId - 1).map(cand).collect();
        lexical.push(cand(0));

        let fused = fuse(&[("vector", &vector[..]), ("lexical", &lexical[..])], k, DUAL_SIGNAL_BOOST);
        assert_eq!(fused[0].candidate.chunk_id, 0);
    }

    #[test]
    fn unit_boost_is_plain_rrf() {
        let vector = vec![cand(1), cand(2)];
        let lexical = vec![cand(2)];
        let fused = fuse(&[("vector", &vector[..]), ("lexical", &lexical[..])], 60, 1.0);
        let expected = 1.0 / 62.0 + 1.0 / 61.0;
        assert!((fused[0].rrf_score - expected).abs() < 1e-12);
    }

    #[test]
    fn repeats_inside_one_list_count_once() {
        let vector = vec![cand(1), cand(1), cand(2)];
        let fused = fuse(&[("vector", &vector[..])], 60, DUAL_SIGNAL_BOOST);
        assert_eq!(ids(&fused), vec![1, 2]);
        assert!(!fused[0].is_multi_signal());
        assert!((fused[0].rrf_score - 1.0 / 61.0).abs() < 1e-12);
    }

    #[test]
    fn extra_lists_add_up() {
        let a = vec![cand(1)];
        let b = vec![cand(2), cand(1)];
        let c = vec![cand(1)];
        let fused = fuse(&[("a", &a[..]), ("b", &b[..]), ("c", &c[..])], 60, 1.0);
        assert_eq!(fused[0].candidate.chunk_id, 1);
        assert_eq!(fused[0].signals.len(), 3);
        let expected = 1.0 / 61.0 + 1.0 / 62.0 + 1.0 / 61.0;
        assert!((fused[0].rrf_score - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_input_fuses_to_nothing() {
        let empty: Vec<RankedCandidate> = Vec::new();
        assert!(fuse(&[("vector", &empty[..]), ("lexical", &empty[..])], 60, 1.5).is_empty());
        assert!(fuse(&[], 60, 1.5).is_empty());
    }

    #[test]
    fn normalization_scales_best_to_one() {
        let vector = vec![cand(1), cand(2)];
        let lexical = vec![cand(2)];
        let fused = fuse(&[("vector", &vector[..]), ("lexical", &lexical[..])], 60, 1.5);
        let normalized = into_normalized_candidates(fused);
        assert_eq!(normalized[0].chunk_id, 2);
        assert!((normalized[0].signal_score - 1.0).abs() < 1e-12);
        assert!(normalized[1].signal_score > 0.0 && normalized[1].signal_score < 1.0);
    }
}
