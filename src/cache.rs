//! Pluggable storage for fetched key sets
//!
//! The verifier never talks to a concrete cache. Host applications hand it an
//! `Arc<dyn KeyCache>`, usually an adapter over whatever cache they already run
//! (Redis, memcached, a framework cache). Two implementations ship with the crate:
//!
//! - [`NoopCache`]: stores nothing, every verifier fetches the JWKS itself
//! - [`MemoryCache`]: process-local map with per-entry expiry

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;

/// Key/value store for key sets with a time-to-live per entry
///
/// Expiry is entirely up to the implementation; there is no invalidation API.
/// Implementations shared across verifiers must tolerate concurrent reads.
#[async_trait]
pub trait KeyCache: Send + Sync {
    /// Store `value` under `key` for at most `ttl`
    async fn put(&self, key: &str, value: JwkSet, ttl: Duration);

    /// Get the live value stored under `key`
    async fn get(&self, key: &str) -> Option<JwkSet>;

    /// Whether a live value is stored under `key`
    async fn has(&self, key: &str) -> bool;
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl KeyCache for NoopCache {
    async fn put(&self, _key: &str, _value: JwkSet, _ttl: Duration) {}

    async fn get(&self, _key: &str) -> Option<JwkSet> {
        None
    }

    async fn has(&self, _key: &str) -> bool {
        false
    }
}

struct CachedKeySet {
    keys: JwkSet,
    expires_at: Instant,
}

impl CachedKeySet {
    fn new(keys: JwkSet, ttl: Duration) -> Self {
        Self {
            keys,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-process cache with per-entry expiry
///
/// Cloning is cheap and clones share the same storage, so one instance can
/// back several verifiers.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CachedKeySet>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyCache for MemoryCache {
    async fn put(&self, key: &str, value: JwkSet, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CachedKeySet::new(value, ttl));
    }

    async fn get(&self, key: &str) -> Option<JwkSet> {
        let entries = self.entries.read().await;
        let cached = entries.get(key)?;

        if cached.is_expired() {
            return None;
        }

        Some(cached.keys.clone())
    }

    async fn has(&self, key: &str) -> bool {
        let entries = self.entries.read().await;
        entries.get(key).is_some_and(|cached| !cached.is_expired())
    }
}
