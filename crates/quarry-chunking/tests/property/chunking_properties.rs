//! Property tests for the chunker.

use proptest::prelude::*;
use quarry_chunking::Chunker;

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z]{1,12}",
            Just(" ".to_string()),
            Just(". ".to_string()),
            Just("\n".to_string()),
            Just("\n\n".to_string()),
            "[a-zé]{20,60}",
        ],
        0..80,
    )
    .prop_map(|parts| parts.concat())
}

fn strip_ws(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn chunks_are_trimmed_nonempty_and_bounded(
        text in text_strategy(),
        max in 5usize..80,
        overlap_pct in 0usize..90,
    ) {
        let overlap = max * overlap_pct / 100;
        let chunker = Chunker::with_sizes(max, overlap).unwrap();
        for c in chunker.chunk(&text) {
            prop_assert!(!c.is_empty());
            prop_assert_eq!(c.trim(), c.as_str());
            prop_assert!(c.chars().count() <= max, "chunk {:?} exceeds {}", c, max);
        }
    }

    #[test]
    fn short_single_paragraph_is_one_trimmed_chunk(
        text in "[a-z .!?\n]{1,60}",
        extra in 0usize..20,
    ) {
        prop_assume!(!text.contains("\n\n"));
        prop_assume!(!text.trim().is_empty());
        let max = text.chars().count() + extra;
        let chunker = Chunker::with_sizes(max, 0).unwrap();
        prop_assert_eq!(chunker.chunk(&text), vec![text.trim().to_string()]);
    }

    #[test]
    fn chunks_follow_source_order(text in text_strategy(), max in 5usize..80) {
        let chunker = Chunker::with_sizes(max, max / 4).unwrap();
        let mut cursor = 0;
        for c in chunker.chunk(&text) {
            let found = text[cursor..].find(c.as_str());
            prop_assert!(found.is_some(), "chunk {:?} not found after byte {}", c, cursor);
            let start = cursor + found.unwrap_or(0);
            cursor = start + c.chars().next().map_or(1, char::len_utf8);
        }
    }

    #[test]
    fn zero_overlap_loses_nothing(text in text_strategy(), max in 5usize..80) {
        let chunker = Chunker::with_sizes(max, 0).unwrap();
        let rebuilt: String = chunker.chunk(&text).concat();
        prop_assert_eq!(strip_ws(&rebuilt), strip_ws(&text));
    }
}
