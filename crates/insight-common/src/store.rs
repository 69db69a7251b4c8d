/// Injected key-value store with TTL.
///
/// Request-handling layers own an implementation of [`KvStore`] and pass it to whatever
/// needs caching. The scoring crates never see a store, so they hold no state between
/// requests.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::redis::RedisCache;

pub trait KvStore: Send + Sync {
    /// Fetch a value. A miss and an unavailable backend look the same to the caller.
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>>;

    /// Store a value that expires after `ttl_secs`. Returns `true` if it was written.
    fn set_with_ttl<'a>(&'a self, key: &'a str, value: &'a str, ttl_secs: u64)
        -> BoxFuture<'a, bool>;

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, bool>;

    /// Remove every key starting with `prefix`. Returns `true` if the sweep completed.
    fn delete_by_prefix<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, bool>;
}

impl KvStore for RedisCache {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(RedisCache::get(self, key))
    }

    fn set_with_ttl<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
        ttl_secs: u64,
    ) -> BoxFuture<'a, bool> {
        Box::pin(RedisCache::set_with_ttl(self, key, value, ttl_secs))
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(RedisCache::delete(self, key))
    }

    fn delete_by_prefix<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(RedisCache::delete_by_prefix(self, prefix))
    }
}

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local store. Expired entries are dropped lazily on read.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|e| e.expires_at > now).count()
    }
}

impl KvStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move {
            let mut entries = self.entries.lock().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
                Some(_) => {
                    entries.remove(key);
                    None
                }
                None => None,
            }
        })
    }

    fn set_with_ttl<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
        ttl_secs: u64,
    ) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            let expires_at = Instant::now() + Duration::from_secs(ttl_secs);
            let mut entries = self.entries.lock().await;
            entries.insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    expires_at,
                },
            );
            true
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(async move { self.entries.lock().await.remove(key).is_some() })
    }

    fn delete_by_prefix<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            self.entries
                .lock()
                .await
                .retain(|key, _| !key.starts_with(prefix));
            true
        })
    }
}
