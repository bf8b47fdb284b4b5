use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Async map whose entries expire a fixed time after insertion.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::TtlCache;

    #[tokio::test]
    async fn returns_fresh_entries() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("balloons", 3).await;
        assert_eq!(cache.get(&"balloons").await, Some(3));
        assert_eq!(cache.get(&"fires").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_never_hits() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert(1u8, "value").await;
        assert_eq!(cache.get(&1).await, None);
    }

    #[tokio::test]
    async fn insert_replaces_existing_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(1u8, 1).await;
        cache.insert(1u8, 2).await;
        assert_eq!(cache.get(&1).await, Some(2));
    }
}
