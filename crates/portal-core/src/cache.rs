//! In-memory memoization for model lookups.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Thread-safe in-memory map shared by clones of the store.
///
/// Entries never expire; owners drop them explicitly with [`clear`](Self::clear).
#[derive(Debug)]
pub struct CacheStore<K, V> {
    inner: Arc<tokio::sync::RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for CacheStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for CacheStore<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
        }
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the value stored under `key`.
    pub async fn get(&self, key: &K) -> Option<V> {
        let store = self.inner.read().await;
        store.get(key).cloned()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: K, value: V) {
        let mut store = self.inner.write().await;
        store.insert(key, value);
    }

    /// Clear all entries from the cache.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.clear();
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_store_basic_operations() {
        let cache: CacheStore<u32, String> = CacheStore::new();

        // Cache miss
        assert!(cache.get(&1).await.is_none());

        cache.put(1, "value1".to_string()).await;
        assert_eq!(cache.get(&1).await, Some("value1".to_string()));

        // Overwrite
        cache.put(1, "value2".to_string()).await;
        assert_eq!(cache.get(&1).await, Some("value2".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_clones_share_entries() {
        let cache: CacheStore<u32, Vec<u8>> = CacheStore::new();
        let other = cache.clone();

        other.put(7, vec![1, 2]).await;

        assert_eq!(cache.get(&7).await, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_cache_clear_all() {
        let cache: CacheStore<&'static str, u8> = CacheStore::new();

        cache.put("key1", 1).await;
        cache.put("key2", 2).await;

        assert_eq!(cache.len().await, 2);
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
