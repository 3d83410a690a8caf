//! EmbeddingClient behaviour against a scripted backend.

use std::sync::Arc;
use std::time::Duration;

use quarry_core::config::EmbeddingConfig;
use quarry_core::errors::EmbeddingError;
use quarry_core::QuarryError;
use quarry_embeddings::EmbeddingClient;
use test_fixtures::{mock_vector, MockProvider};

const DIMS: usize = 8;

fn config(batch_size: usize, concurrency: usize) -> EmbeddingConfig {
    EmbeddingConfig {
        provider: "mock".into(),
        dimensions: DIMS,
        batch_size,
        concurrency,
        max_attempts: 2,
        base_delay_ms: 1,
        max_delay_ms: 2,
        timeout_ms: 2_000,
        ..Default::default()
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn client(provider: &Arc<MockProvider>, batch_size: usize, concurrency: usize) -> EmbeddingClient {
    EmbeddingClient::new(provider.clone(), &config(batch_size, concurrency))
}

#[tokio::test]
async fn three_texts_come_back_in_order() {
    let provider = Arc::new(MockProvider::new(DIMS));
    let client = client(&provider, 1, 2);

    let vectors = client.embed_batch(&texts(&["x", "y", "z"]), 2).await.unwrap();

    assert_eq!(vectors.len(), 3);
    for (v, t) in vectors.iter().zip(["x", "y", "z"]) {
        assert_eq!(v, &mock_vector(t, DIMS));
    }
}

#[tokio::test]
async fn order_survives_many_batches_and_waves() {
    let provider = Arc::new(MockProvider::new(DIMS).with_delay(Duration::from_millis(2)));
    let client = client(&provider, 3, 2);
    let input: Vec<String> = (0..20).map(|i| format!("text {i}")).collect();

    let vectors = client.embed_documents(&input).await.unwrap();

    assert_eq!(vectors.len(), input.len());
    for (v, t) in vectors.iter().zip(&input) {
        assert_eq!(v, &mock_vector(t, DIMS));
    }
    // ceil(20 / 3) batches
    assert_eq!(provider.call_count(), 7);
}

#[tokio::test]
async fn waves_bound_concurrent_requests() {
    let provider = Arc::new(MockProvider::new(DIMS).with_delay(Duration::from_millis(20)));
    let client = client(&provider, 1, 3);
    let input: Vec<String> = (0..9).map(|i| format!("t{i}")).collect();

    client.embed_batch(&input, 3).await.unwrap();

    assert!(provider.max_in_flight() <= 3, "saw {}", provider.max_in_flight());
    assert!(provider.max_in_flight() >= 2, "waves should run batches together");
}

#[tokio::test]
async fn failed_batch_falls_back_to_single_items() {
    let provider = Arc::new(MockProvider::new(DIMS).failing_batches_over(1));
    let client = client(&provider, 2, 2);

    let vectors = client.embed_batch(&texts(&["a", "b", "c"]), 2).await.unwrap();

    assert_eq!(vectors, vec![mock_vector("a", DIMS), mock_vector("b", DIMS), mock_vector("c", DIMS)]);
    let singles = provider.requests().iter().filter(|r| r.len() == 1).count();
    assert!(singles >= 2);
}

#[tokio::test]
async fn malformed_reply_is_treated_as_failure() {
    let provider = Arc::new(MockProvider::new(DIMS).malformed_batches_over(1));
    let client = client(&provider, 4, 1);

    let vectors = client.embed_batch(&texts(&["p", "q", "r"]), 1).await.unwrap();

    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors[2], mock_vector("r", DIMS));
    // 2 attempts at the batch, then 3 single-item calls
    assert_eq!(provider.call_count(), 5);
}

#[tokio::test]
async fn item_failure_names_the_input_index() {
    let provider = Arc::new(MockProvider::new(DIMS).poisoned_on("bad"));
    let client = client(&provider, 2, 2);

    let err = client
        .embed_batch(&texts(&["a", "b", "bad", "c"]), 2)
        .await
        .unwrap_err();

    match err {
        QuarryError::EmbeddingError(EmbeddingError::ItemFailed { index, reason }) => {
            assert_eq!(index, 2);
            assert!(reason.contains("attempts"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transient_failure_is_retried() {
    let provider = Arc::new(MockProvider::new(DIMS).flaky(1));
    let client = client(&provider, 8, 1);

    let vectors = client.embed_batch(&texts(&["one", "two"]), 1).await.unwrap();

    assert_eq!(vectors.len(), 2);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn wrong_dimension_backend_fails_per_item() {
    let provider = Arc::new(MockProvider::new(DIMS / 2));
    let client = client(&provider, 4, 1);

    let err = client.embed_batch(&texts(&["solo"]), 1).await.unwrap_err();

    assert!(matches!(
        err,
        QuarryError::EmbeddingError(EmbeddingError::ItemFailed { index: 0, .. })
    ));
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let provider = Arc::new(MockProvider::new(DIMS));
    let client = client(&provider, 4, 2);

    assert!(client.embed_batch(&[], 2).await.unwrap().is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn repeated_query_is_served_from_cache() {
    let provider = Arc::new(MockProvider::new(DIMS));
    let client = client(&provider, 4, 2);

    let first = client.embed_query("what is ownership").await.unwrap();
    let second = client.embed_query("what is ownership").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn zero_concurrency_is_treated_as_one() {
    let provider = Arc::new(MockProvider::new(DIMS).with_delay(Duration::from_millis(5)));
    let client = client(&provider, 1, 1);

    let vectors = client.embed_batch(&texts(&["a", "b"]), 0).await.unwrap();

    assert_eq!(vectors.len(), 2);
    assert_eq!(provider.max_in_flight(), 1);
}
