use quarry_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = QuarryConfig::from_toml("").unwrap();

    // Storage defaults
    assert_eq!(config.storage.db_path, "quarry.db");
    assert_eq!(config.storage.read_pool_size, 4);
    assert_eq!(config.storage.busy_timeout_ms, 5_000);

    // Embedding defaults
    assert_eq!(config.embedding.provider, "ollama");
    assert_eq!(config.embedding.dimensions, 768);
    assert_eq!(config.embedding.batch_size, 16);
    assert_eq!(config.embedding.concurrency, 4);
    assert_eq!(config.embedding.max_attempts, 3);

    // Chunking defaults
    assert_eq!(config.chunking.max_chunk_size, 1000);
    assert_eq!(config.chunking.chunk_overlap, 200);

    // Retrieval defaults
    assert_eq!(config.retrieval.rrf_k, 60);
    assert_eq!(config.retrieval.candidate_limit, 30);
    assert_eq!(config.retrieval.final_top_k, 10);
    assert_eq!(config.retrieval.intermediate_top_k, 15);
    assert_eq!(config.retrieval.match_weight, 10.0);
    assert_eq!(config.retrieval.signal_weight, 0.1);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[storage]
db_path = "/var/lib/quarry/index.db"

[embedding]
provider = "hashing"
dimensions = 256

[retrieval]
rrf_k = 20
"#;
    let config = QuarryConfig::from_toml(toml).unwrap();
    assert_eq!(config.storage.db_path, "/var/lib/quarry/index.db");
    assert_eq!(config.embedding.provider, "hashing");
    assert_eq!(config.embedding.dimensions, 256);
    // Non-overridden fields keep defaults
    assert_eq!(config.embedding.batch_size, 16);
    assert_eq!(config.retrieval.rrf_k, 20);
    assert_eq!(config.retrieval.final_top_k, 10);
}

#[test]
fn config_rejects_overlap_not_smaller_than_chunk_size() {
    let toml = r#"
[chunking]
max_chunk_size = 100
chunk_overlap = 100
"#;
    let err = QuarryConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("chunk_overlap"));
}

#[test]
fn config_rejects_zero_concurrency() {
    let toml = r#"
[embedding]
concurrency = 0
"#;
    assert!(QuarryConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_boost_below_one() {
    let toml = r#"
[retrieval]
dual_signal_boost = 0.5
"#;
    assert!(QuarryConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_candidate_limit_beyond_boost_guarantee() {
    let toml = r#"
[retrieval]
candidate_limit = 200
"#;
    let err = QuarryConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("dual_signal_boost"));
}

#[test]
fn config_rejects_rrf_k_too_small_for_boost() {
    let toml = r#"
[retrieval]
rrf_k = 0
"#;
    assert!(QuarryConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_boost_too_small_for_limits() {
    let toml = r#"
[retrieval]
dual_signal_boost = 1.0
candidate_limit = 100
"#;
    assert!(QuarryConfig::from_toml(toml).is_err());
}

#[test]
fn config_accepts_larger_boost_for_longer_lists() {
    let toml = r#"
[retrieval]
candidate_limit = 200
dual_signal_boost = 2.5
"#;
    let config = QuarryConfig::from_toml(toml).unwrap();
    assert_eq!(config.retrieval.candidate_limit, 200);
}

#[test]
fn config_accepts_limit_at_boost_guarantee_edge() {
    let toml = r#"
[retrieval]
candidate_limit = 122
"#;
    assert!(QuarryConfig::from_toml(toml).is_ok());
    assert!(QuarryConfig::from_toml("[retrieval]\ncandidate_limit = 123").is_err());
}

#[test]
fn min_boost_matches_default_limits() {
    // k = 60, n = 30: (60 + 30) / 122
    let min = min_dual_signal_boost(60, 30);
    assert!((min - 90.0 / 122.0).abs() < 1e-12);
    assert!(min < 1.5);
}

#[test]
fn config_rejects_malformed_toml() {
    assert!(QuarryConfig::from_toml("[storage\ndb_path =").is_err());
}

#[test]
fn config_serde_roundtrip() {
    let config = QuarryConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = QuarryConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.storage.db_path, config.storage.db_path);
    assert_eq!(
        roundtripped.embedding.dimensions,
        config.embedding.dimensions
    );
}

#[test]
fn config_from_missing_file_is_config_error() {
    let err = QuarryConfig::from_file(std::path::Path::new("/nonexistent/quarry.toml"))
        .unwrap_err();
    assert!(matches!(err, quarry_core::QuarryError::ConfigError(_)));
}
