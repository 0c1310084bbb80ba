//! In-memory cache implementation with LRU eviction.
//!
//! Plain values and lists share one keyspace, the way they do in Redis: a
//! list operation against a key holding a plain value fails with
//! [`CacheError::WrongType`], and vice versa.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use notifyd_core::cache::{resolve_range, slice_range, Cache, CacheError, ListCache, Result};

#[derive(Debug, Clone)]
enum CacheValue {
    Bytes(Vec<u8>),
    List(VecDeque<Vec<u8>>),
}

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: CacheValue,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: CacheValue, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Expired entries are dropped lazily, when they are next touched.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` keys.
    ///
    /// A list counts as one key regardless of its length. Zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

/// Removes `key` if it has expired, so callers only ever see live entries.
fn evict_if_expired(store: &mut LruCache<String, CacheEntry>, key: &str) {
    if store.peek(key).is_some_and(CacheEntry::is_expired) {
        store.pop(key);
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;
        evict_if_expired(&mut store, key);

        match store.get(key) {
            Some(CacheEntry {
                value: CacheValue::Bytes(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(_) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        let entry = CacheEntry::new(CacheValue::Bytes(value.to_vec()), ttl);
        store.put(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }
}

#[async_trait]
impl ListCache for MemoryCache {
    async fn push_front(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut store = self.store.write().await;
        evict_if_expired(&mut store, key);

        match store.get_mut(key) {
            Some(CacheEntry {
                value: CacheValue::List(list),
                ..
            }) => list.push_front(value.to_vec()),
            Some(_) => return Err(CacheError::WrongType(key.to_string())),
            None => {
                let list = VecDeque::from([value.to_vec()]);
                store.put(key.to_string(), CacheEntry::new(CacheValue::List(list), None));
            }
        }
        Ok(())
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()> {
        let mut store = self.store.write().await;
        evict_if_expired(&mut store, key);

        let list = match store.get_mut(key) {
            Some(CacheEntry {
                value: CacheValue::List(list),
                ..
            }) => list,
            Some(_) => return Err(CacheError::WrongType(key.to_string())),
            None => return Ok(()),
        };

        match resolve_range(list.len(), start, stop) {
            Some((from, to)) => {
                list.truncate(to);
                list.drain(..from);
            }
            None => list.clear(),
        }

        // Redis deletes lists that become empty
        if list.is_empty() {
            store.pop(key);
        }
        Ok(())
    }

    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut store = self.store.write().await;
        evict_if_expired(&mut store, key);

        match store.get_mut(key) {
            Some(CacheEntry {
                value: CacheValue::List(list),
                ..
            }) => Ok(slice_range(list.make_contiguous(), start, stop).to_vec()),
            Some(_) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn remove_value(&self, key: &str, count: usize, value: &[u8]) -> Result<usize> {
        let mut store = self.store.write().await;
        evict_if_expired(&mut store, key);

        let list = match store.get_mut(key) {
            Some(CacheEntry {
                value: CacheValue::List(list),
                ..
            }) => list,
            Some(_) => return Err(CacheError::WrongType(key.to_string())),
            None => return Ok(0),
        };

        let mut removed = 0;
        list.retain(|item| {
            if removed < count && item.as_slice() == value {
                removed += 1;
                false
            } else {
                true
            }
        });

        if list.is_empty() {
            store.pop(key);
        }
        Ok(removed)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        let mut store = self.store.write().await;
        evict_if_expired(&mut store, key);

        if let Some(entry) = store.peek_mut(key) {
            entry.expires_at = Some(Instant::now() + ttl);
        }
        Ok(())
    }
}
