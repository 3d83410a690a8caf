//! Property tests for vector search ordering and limits.

use proptest::prelude::*;
use quarry_core::models::{NewChunk, NewDocument};
use quarry_core::traits::IChunkStore;
use quarry_storage::StorageEngine;

const DIMS: usize = 3;

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, DIMS)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn vector_results_are_ascending_and_bounded(
        stored in prop::collection::vec(vector(), 1..20),
        query in vector(),
        limit in 1usize..10,
    ) {
        prop_assume!(query.iter().any(|x| x.abs() > 1e-3));
        let store = StorageEngine::open_in_memory(DIMS).unwrap();
        let chunks = stored
            .iter()
            .enumerate()
            .map(|(i, v)| NewChunk { content: format!("chunk {i}"), embedding: v.clone() })
            .collect();
        store
            .insert_document(&NewDocument {
                source: "p.txt".into(),
                content_hash: "h".into(),
                chunks,
            })
            .unwrap();

        let results = store.vector_search(&query, limit).unwrap();
        prop_assert_eq!(results.len(), limit.min(stored.len()));
        for w in results.windows(2) {
            prop_assert!(w[0].1 <= w[1].1);
        }
        for (_, distance) in &results {
            prop_assert!((-1e-9..=2.0 + 1e-9).contains(distance));
        }
    }

    #[test]
    fn reinsert_never_duplicates(times in 1usize..5, n in 1usize..6) {
        let store = StorageEngine::open_in_memory(DIMS).unwrap();
        for t in 0..times {
            let chunks = (0..n)
                .map(|i| NewChunk { content: format!("v{t} c{i}"), embedding: vec![1.0, i as f32, 0.5] })
                .collect();
            store
                .insert_document(&NewDocument { source: "same.txt".into(), content_hash: format!("{t}"), chunks })
                .unwrap();
        }
        prop_assert_eq!(store.chunk_count().unwrap(), n);
        prop_assert_eq!(store.document_count().unwrap(), 1);
    }
}
