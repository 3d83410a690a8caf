//! Query embedding cache using moka.
//!
//! Keys are blake3 hashes of the query text, so the cache never holds raw
//! queries. TinyLFU admission with an idle TTL.

use std::time::Duration;

use moka::sync::Cache;

pub struct QueryCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    /// Cache key for a query.
    pub fn key(query: &str) -> String {
        blake3::hash(query.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(query))
    }

    pub fn insert(&self, query: &str, embedding: Vec<f32>) {
        self.cache.insert(Self::key(query), embedding);
    }

    /// Approximate entry count; moka applies writes lazily.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
