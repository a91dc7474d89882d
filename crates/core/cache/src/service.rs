use std::{hash::Hash, num::NonZeroUsize, sync::Arc, time::Instant};

use lru::LruCache;
use tokio::sync::Mutex;

use crate::TimedCacheConfig;

struct Entry<Value> {
    value: Arc<Value>,
    inserted: Instant,
}

/// Expiring read cache for derived results
///
/// Entries expire after the configured TTL and are checked on read;
/// capacity is bounded with least-recently-used eviction.
#[derive(Clone)]
pub struct TimedCache<Id: Hash + Eq, Value> {
    config: Arc<TimedCacheConfig>,
    entries: Arc<Mutex<LruCache<Id, Entry<Value>>>>,
}

impl<Id: Hash + Eq + Clone, Value> TimedCache<Id, Value> {
    pub fn new() -> Self {
        Self::from_config(TimedCacheConfig::default())
    }

    pub fn from_config(config: TimedCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity.max(1)).unwrap_or(NonZeroUsize::MIN);

        Self {
            config: Arc::new(config),
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Store a value
    pub async fn insert(&self, id: Id, value: Value) {
        self.entries.lock().await.push(
            id,
            Entry {
                value: Arc::new(value),
                inserted: Instant::now(),
            },
        );
    }

    /// Fetch a value if present and not expired
    pub async fn get(&self, id: &Id) -> Option<Arc<Value>> {
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(id) {
            Some(entry) => {
                if entry.inserted.elapsed() <= self.config.ttl {
                    return Some(entry.value.clone());
                }

                true
            }
            None => false,
        };

        if expired {
            entries.pop(id);
        }

        None
    }

    /// Drop a value
    pub async fn remove(&self, id: &Id) {
        self.entries.lock().await.pop(id);
    }

    /// Drop every value
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Sweep expired entries
    pub async fn cleanup(&self) {
        let mut entries = self.entries.lock().await;

        let expired: Vec<Id> = entries
            .iter()
            .filter(|(_, entry)| entry.inserted.elapsed() > self.config.ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            entries.pop(&id);
        }
    }

    /// Number of entries held, including any expired but unswept
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<Id: Hash + Eq + Clone, Value> Default for TimedCache<Id, Value> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{TimedCache, TimedCacheConfig};

    fn short_lived(capacity: usize) -> TimedCache<String, Vec<String>> {
        TimedCache::from_config(TimedCacheConfig {
            ttl: Duration::from_millis(40),
            capacity,
        })
    }

    #[async_std::test]
    async fn entries_expire_after_ttl() {
        let cache = short_lived(8);
        cache
            .insert("trending".to_string(), vec!["event_1".to_string()])
            .await;

        let hit = cache.get(&"trending".to_string()).await;
        assert_eq!(*hit.expect("still valid"), vec!["event_1".to_string()]);

        async_std::task::sleep(Duration::from_millis(60)).await;
        assert!(cache.get(&"trending".to_string()).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[async_std::test]
    async fn capacity_evicts_least_recently_used() {
        let cache = short_lived(2);

        for key in ["a", "b", "c"] {
            cache.insert(key.to_string(), vec![]).await;
        }

        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&"a".to_string()).await.is_none());
        assert!(cache.get(&"c".to_string()).await.is_some());
    }

    #[async_std::test]
    async fn cleanup_sweeps_expired_entries() {
        let cache = short_lived(8);
        cache.insert("stale".to_string(), vec![]).await;

        async_std::task::sleep(Duration::from_millis(60)).await;
        cache.insert("fresh".to_string(), vec![]).await;
        cache.cleanup().await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&"fresh".to_string()).await.is_some());

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
