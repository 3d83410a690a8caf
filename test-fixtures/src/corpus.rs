use serde::Deserialize;

/// One document of the golden corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusDocument {
    pub source: String,
    pub text: String,
}

const CORPUS_JSON: &str = include_str!("../golden/corpus.json");

/// Small mixed-topic corpus used by storage, retrieval, and ingestion tests.
pub fn sample_corpus() -> Vec<CorpusDocument> {
    serde_json::from_str(CORPUS_JSON).expect("golden corpus is valid JSON")
}
