//! Events and spans land in the JSON output with their structured fields.

use std::io;
use std::sync::{Arc, Mutex};

use quarry_observability::events;
use quarry_observability::tracing_setup::spans::names;
use quarry_observability::{embedding_span, ingestion_span, retrieval_span};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}

fn capture(f: impl FnOnce()) -> Vec<serde_json::Value> {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .json()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf.lines()
}

#[test]
fn document_ingested_carries_fields() {
    let lines = capture(|| events::document_ingested("notes.txt", 4, 12));
    assert_eq!(lines.len(), 1);
    let fields = &lines[0]["fields"];
    assert_eq!(fields["event"], "document_ingested");
    assert_eq!(fields["source"], "notes.txt");
    assert_eq!(fields["chunk_count"], 4);
}

#[test]
fn degradation_is_a_warning() {
    let lines = capture(|| events::degradation_triggered("lexical", "fts error", "vector"));
    assert_eq!(lines[0]["level"], "WARN");
    assert_eq!(lines[0]["fields"]["fallback"], "vector");
}

#[test]
fn every_named_event_is_emitted() {
    let lines = capture(|| {
        events::document_skipped("a.txt", "unchanged");
        events::search_completed("hybrid", 3, false, 5);
        events::embedding_batch_degraded(16, 16, "timeout");
    });
    let names: Vec<&str> = lines
        .iter()
        .map(|l| l["fields"]["event"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["document_skipped", "search_completed", "embedding_batch_degraded"]
    );
}

#[test]
fn spans_use_named_constants() {
    let lines = capture(|| {
        let span = retrieval_span!("rust", "hybrid");
        assert_eq!(span.metadata().map(|m| m.name()), Some(names::RETRIEVAL));
        let span = ingestion_span!("doc.md");
        assert_eq!(span.metadata().map(|m| m.name()), Some(names::INGESTION));
        let span = embedding_span!("hashing", 3usize);
        assert_eq!(span.metadata().map(|m| m.name()), Some(names::EMBEDDING));
    });
    assert!(lines.is_empty());
}

#[test]
fn init_twice_reports_existing_subscriber() {
    let _ = quarry_observability::init_tracing();
    assert!(!quarry_observability::init_tracing());
}
