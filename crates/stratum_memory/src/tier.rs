// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! In-process cache implementation with lazy expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use stratum_tier::{CacheEntry, CacheKey, CacheTier, CacheValue, Error, TierMetadata};

use crate::builder::InMemoryCacheBuilder;

/// A stored value with its absolute expiration deadline.
#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Slot<V> {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// An in-process cache tier.
///
/// Entries expire lazily: an expired entry is removed the next time a read
/// touches it. Cloning produces a second handle to the same storage, which
/// is useful for inspecting a tier directly while it also sits inside an
/// orchestration chain.
///
/// # Examples
///
/// ```no_run
/// use stratum_memory::InMemoryCache;
/// use stratum_tier::{CacheEntry, CacheTier};
///
/// # async fn example() {
/// let cache = InMemoryCache::<String, i32>::new();
///
/// cache.set(&"key".to_string(), CacheEntry::new(42)).await.unwrap();
/// let value = cache.get(&"key".to_string()).await.unwrap();
/// assert_eq!(value, Some(42));
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryCache<K, V> {
    data: Arc<Mutex<HashMap<K, Slot<V>>>>,
    metadata: TierMetadata,
}

impl<K, V> Clone for InMemoryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            metadata: self.metadata,
        }
    }
}

impl<K, V> Default for InMemoryCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryCache<K, V> {
    /// Creates a cache with the default attributes (900 s TTL, writable,
    /// skip-ahead eligible).
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for configuring an in-process cache.
    #[must_use]
    pub fn builder() -> InMemoryCacheBuilder<K, V> {
        InMemoryCacheBuilder::new()
    }

    /// Constructs an `InMemoryCache` from a builder.
    pub(crate) fn from_builder(builder: &InMemoryCacheBuilder<K, V>) -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            metadata: builder.metadata,
        }
    }

    fn deadline(&self, ttl: Option<Duration>) -> Instant {
        Instant::now() + ttl.unwrap_or(self.metadata.default_ttl)
    }
}

#[async_trait]
impl<K, V> CacheTier<K, V> for InMemoryCache<K, V>
where
    K: CacheKey,
    V: CacheValue,
{
    fn metadata(&self) -> TierMetadata {
        self.metadata
    }

    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        let now = Instant::now();
        let mut data = self.data.lock();
        match data.get(key) {
            Some(slot) if slot.expired(now) => {
                data.remove(key);
                Ok(None)
            }
            Some(slot) => Ok(Some(slot.value.clone())),
            None => Ok(None),
        }
    }

    async fn get_many(&self, keys: &[K]) -> Result<HashMap<K, V>, Error> {
        let now = Instant::now();
        let mut data = self.data.lock();
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            match data.get(key) {
                Some(slot) if slot.expired(now) => {
                    data.remove(key);
                }
                Some(slot) => {
                    found.insert(key.clone(), slot.value.clone());
                }
                None => {}
            }
        }
        Ok(found)
    }

    async fn set(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        if self.metadata.read_only {
            return Ok(());
        }
        let expires_at = self.deadline(entry.ttl());
        self.data.lock().insert(
            key.clone(),
            Slot {
                value: entry.into_value(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn set_many(&self, entries: &HashMap<K, CacheEntry<V>>, ttl: Option<Duration>) -> Result<(), Error> {
        if self.metadata.read_only {
            return Ok(());
        }
        let mut data = self.data.lock();
        for (key, entry) in entries {
            let expires_at = self.deadline(entry.ttl().or(ttl));
            data.insert(
                key.clone(),
                Slot {
                    value: entry.value().clone(),
                    expires_at,
                },
            );
        }
        Ok(())
    }

    async fn delete(&self, keys: &[K]) -> Result<u64, Error> {
        let now = Instant::now();
        let mut data = self.data.lock();
        let mut count = 0;
        for key in keys {
            if let Some(slot) = data.remove(key)
                && !slot.expired(now)
            {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn flush(&self) -> Result<(), Error> {
        self.data.lock().clear();
        Ok(())
    }

    /// Entry count, including expired entries not yet lazily collected.
    fn len(&self) -> Option<u64> {
        Some(self.data.lock().len() as u64)
    }
}
