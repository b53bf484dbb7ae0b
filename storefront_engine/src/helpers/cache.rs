use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

/// A read-through cache with per-entry expiry.
///
/// Every entry is valid for the TTL given at construction, measured from insertion. There is
/// deliberately no invalidation path: callers that update the record behind an entry accept reads
/// of the stale value until the TTL lapses. Expired entries are dropped lazily, when the next
/// insert for the same key overwrites them.
pub struct ExpiringCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, (Instant, V)>>,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: RwLock::new(HashMap::new()) }
    }

    /// Returns a clone of the cached value, or `None` when the key is absent or its entry has
    /// expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some((inserted_at, value)) if inserted_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key, (Instant::now(), value));
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
