//! TTL cache with per-key single-flight population

use chrono::{DateTime, Utc};
use moka::future::Cache;
use moka::Expiry;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// A cached value and when it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn fetched_at_millis(&self) -> i64 {
        self.fetched_at.timestamp_millis()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Expires every entry `ttl` after it was written; reads do not extend it
struct EntryExpiry;

impl<T> Expiry<String, CacheEntry<T>> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry<T>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry<T>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Statistics about the cache
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Invalidation counters
///
/// Each logical key is stored under a slot `{key}#{epoch}.{generation}`.
/// Invalidating a key bumps its generation and invalidating everything bumps
/// the epoch, so a fetch already running for the old slot can never answer a
/// caller that arrives after the invalidation.
#[derive(Debug, Default)]
struct Generations {
    epoch: u64,
    keys: HashMap<String, u64>,
}

impl Generations {
    fn slot(&self, key: &str) -> String {
        let generation = self.keys.get(key).copied().unwrap_or(0);
        format!("{}#{}.{}", key, self.epoch, generation)
    }
}

/// String-keyed TTL store
///
/// Entries are replaced whole, never merged. There is no size bound: the key
/// space is one entry per folder plus the folder list, which stays small for a
/// gallery. Do not key it by unbounded user input.
pub struct CacheStore<T> {
    cache: Cache<String, CacheEntry<T>>,
    generations: RwLock<Generations>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> CacheStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let cache = Cache::builder().expire_after(EntryExpiry).build();

        Self {
            cache,
            generations: RwLock::new(Generations::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    async fn current_slot(&self, key: &str) -> String {
        self.generations.read().await.slot(key)
    }

    /// Return the live value for `key`, or run `populate` and store its result for `ttl`
    ///
    /// Concurrent callers that miss on the same key wait for a single
    /// `populate` and all receive its result. Callers on other keys are not
    /// blocked. A caller arriving after [`invalidate`](Self::invalidate)
    /// never joins a `populate` that started before it.
    pub async fn get_or_populate<F>(&self, key: &str, ttl: Duration, populate: F) -> T
    where
        F: Future<Output = T>,
    {
        let slot = {
            let mut generations = self.generations.write().await;
            generations.keys.entry(key.to_string()).or_insert(0);
            generations.slot(key)
        };

        let entry = self
            .cache
            .entry(slot.clone())
            .or_insert_with(async {
                let value = populate.await;
                CacheEntry {
                    value,
                    fetched_at: Utc::now(),
                    ttl,
                }
            })
            .await;

        if entry.is_fresh() {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key, "Cache miss, populated");

            if self.current_slot(key).await != slot {
                // invalidated while populating; the result only answers callers already waiting
                self.cache.invalidate(&slot).await;
                debug!(key, "Discarded value fetched before invalidation");
            }
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            let age_ms = Utc::now().timestamp_millis() - entry.value().fetched_at_millis();
            debug!(key, age_ms, "Cache hit");
        }

        entry.into_value().value
    }

    /// Look at the live entry for `key` without populating it
    pub async fn peek(&self, key: &str) -> Option<CacheEntry<T>> {
        let slot = self.current_slot(key).await;
        self.cache.get(&slot).await
    }

    /// Drop the entry for `key`, or every entry when `key` is `None`
    ///
    /// Removing a key that is not cached is a no-op. A populate still running
    /// for a dropped key finishes for the callers already waiting on it, but
    /// its result is not kept.
    pub async fn invalidate(&self, key: Option<&str>) {
        match key {
            Some(key) => {
                let stale = {
                    let mut generations = self.generations.write().await;
                    let stale = generations.slot(key);
                    match generations.keys.get_mut(key) {
                        Some(generation) => {
                            *generation += 1;
                            Some(stale)
                        }
                        None => None,
                    }
                };
                if let Some(stale) = stale {
                    self.cache.invalidate(&stale).await;
                }
                debug!(key, "Invalidated cache entry");
            }
            None => {
                {
                    let mut generations = self.generations.write().await;
                    generations.epoch += 1;
                    generations.keys.clear();
                }
                self.cache.invalidate_all();
                debug!("Invalidated all cache entries");
            }
        }
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            entries: self.cache.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T> Default for CacheStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
