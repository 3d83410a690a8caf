//! Property tests for fusion and reranking.

use std::collections::HashSet;

use proptest::prelude::*;
use quarry_core::models::{ChunkId, RankedCandidate};
use quarry_retrieval::search::rrf_fusion::{fuse, into_normalized_candidates, rrf_contribution};
use quarry_retrieval::{Reranker, DUAL_SIGNAL_BOOST};

fn candidates(ids: &[ChunkId]) -> Vec<RankedCandidate> {
    ids.iter()
        .map(|&id| RankedCandidate {
            chunk_id: id,
            content: format!("chunk {id} about topic{}", id % 7),
            source_filename: format!("doc{}.txt", id % 3),
            signal_score: 1.0 / (1.0 + id as f64),
        })
        .collect()
}

fn unique_ids(max_len: usize) -> impl Strategy<Value = Vec<ChunkId>> {
    proptest::collection::hash_set(0..200_i64, 0..max_len).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn contribution_decreases_with_rank(rank in 0usize..10_000, k in 1u32..500) {
        prop_assert!(rrf_contribution(rank, k) > rrf_contribution(rank + 1, k));
    }

    #[test]
    fn fused_list_is_the_sorted_union(a in unique_ids(30), b in unique_ids(30)) {
        let (va, vb) = (candidates(&a), candidates(&b));
        let fused = fuse(&[("vector", &va[..]), ("lexical", &vb[..])], 60, DUAL_SIGNAL_BOOST);

        let union: HashSet<ChunkId> = a.iter().chain(&b).copied().collect();
        prop_assert_eq!(fused.len(), union.len());
        for pair in fused.windows(2) {
            prop_assert!(pair[0].rrf_score >= pair[1].rrf_score);
        }
    }

    #[test]
    fn dual_signal_chunks_lead(a in unique_ids(30), b in unique_ids(30)) {
        let (va, vb) = (candidates(&a), candidates(&b));
        let fused = fuse(&[("vector", &va[..]), ("lexical", &vb[..])], 60, DUAL_SIGNAL_BOOST);

        let first_single = fused.iter().position(|f| !f.is_multi_signal()).unwrap_or(fused.len());
        prop_assert!(fused[first_single..].iter().all(|f| !f.is_multi_signal()));
    }

    #[test]
    fn fusion_is_commutative_in_scores(a in unique_ids(30), b in unique_ids(30)) {
        let (va, vb) = (candidates(&a), candidates(&b));
        let ab = fuse(&[("vector", &va[..]), ("lexical", &vb[..])], 60, DUAL_SIGNAL_BOOST);
        let ba = fuse(&[("lexical", &vb[..]), ("vector", &va[..])], 60, DUAL_SIGNAL_BOOST);

        for f in &ab {
            let other = ba.iter().find(|g| g.candidate.chunk_id == f.candidate.chunk_id);
            prop_assert!(other.is_some());
            prop_assert!((other.map(|g| g.rrf_score).unwrap_or(0.0) - f.rrf_score).abs() < 1e-12);
        }
    }

    #[test]
    fn normalized_scores_stay_in_unit_range(a in unique_ids(30), b in unique_ids(30)) {
        let (va, vb) = (candidates(&a), candidates(&b));
        let fused = fuse(&[("vector", &va[..]), ("lexical", &vb[..])], 60, DUAL_SIGNAL_BOOST);
        let normalized = into_normalized_candidates(fused);

        prop_assert!(normalized.iter().all(|c| c.signal_score > 0.0 && c.signal_score <= 1.0));
        if let Some(first) = normalized.first() {
            prop_assert!((first.signal_score - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn reranking_is_deterministic_and_capped(
        ids in unique_ids(40),
        query in "[a-z]{3,8}( [a-z]{3,8}){0,3}",
        cap in 1usize..20,
    ) {
        let reranker = Reranker::default();
        let first = reranker.rerank(&query, candidates(&ids), cap);
        let second = reranker.rerank(&query, candidates(&ids), cap);

        prop_assert_eq!(first.len(), ids.len().min(cap));
        let a: Vec<ChunkId> = first.iter().map(|r| r.candidate.chunk_id).collect();
        let b: Vec<ChunkId> = second.iter().map(|r| r.candidate.chunk_id).collect();
        prop_assert_eq!(a, b);
        for pair in first.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
