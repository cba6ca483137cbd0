// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Mock cache implementation for testing.
//!
//! This module provides [`MockCache`], a configurable in-memory backend that
//! records all operations and supports failure injection for testing error
//! paths, plus metadata overrides for shaping skip-ahead and promotion
//! decisions in orchestration tests.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{CacheEntry, CacheKey, CacheTier, CacheValue, Error, TierKind, TierMetadata, TierSettings};

/// Recorded cache operation with full context.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheOp<K, V> {
    /// A get operation was performed with the given key.
    Get(K),
    /// A batch get operation was performed with the given keys.
    GetMany(Vec<K>),
    /// A set operation was performed with the given key and entry.
    Set {
        /// The key that was written.
        key: K,
        /// The entry that was written.
        entry: CacheEntry<V>,
    },
    /// A batch set operation was performed.
    SetMany {
        /// Number of entries in the batch.
        count: usize,
        /// Batch-level expiration, if any.
        ttl: Option<Duration>,
    },
    /// A delete operation was performed with the given keys.
    Delete(Vec<K>),
    /// A flush operation was performed.
    Flush,
}

type FailPredicate<K, V> = Box<dyn Fn(&CacheOp<K, V>) -> bool + Send + Sync>;

/// A configurable mock backend for testing.
///
/// Stores values in memory (without expiring them), records every operation
/// for later verification, and can be configured to fail operations on
/// demand. Cloning produces a second handle to the same storage, which lets
/// tests inspect a tier from outside the orchestrator.
///
/// # Examples
///
/// ```no_run
/// use stratum_tier::testing::{CacheOp, MockCache};
/// use stratum_tier::{CacheEntry, CacheTier};
///
/// # async fn example() {
/// let cache = MockCache::<String, i32>::new();
///
/// cache.set(&"key".to_string(), CacheEntry::new(42)).await.unwrap();
/// let value = cache.get(&"key".to_string()).await.unwrap();
/// assert_eq!(value, Some(42));
///
/// assert_eq!(
///     cache.operations(),
///     vec![
///         CacheOp::Set { key: "key".to_string(), entry: CacheEntry::new(42) },
///         CacheOp::Get("key".to_string()),
///     ]
/// );
/// # }
/// ```
///
/// # Failure Injection
///
/// ```no_run
/// use stratum_tier::testing::{CacheOp, MockCache};
/// use stratum_tier::CacheTier;
///
/// # async fn example() {
/// let cache: MockCache<String, i32> = MockCache::new();
///
/// cache.fail_when(|op| matches!(op, CacheOp::Get(k) if k == "forbidden"));
/// assert!(cache.get(&"forbidden".to_string()).await.is_err());
/// assert!(cache.get(&"allowed".to_string()).await.is_ok());
/// # }
/// ```
pub struct MockCache<K, V> {
    data: Arc<Mutex<HashMap<K, CacheEntry<V>>>>,
    operations: Arc<Mutex<Vec<CacheOp<K, V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<K, V>>>>,
    metadata: Arc<Mutex<TierMetadata>>,
    settings: Arc<Mutex<Option<TierSettings>>>,
}

impl<K, V> std::fmt::Debug for MockCache<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCache")
            .field("data", &self.data)
            .field("metadata", &self.metadata)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Clone for MockCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
            metadata: Arc::clone(&self.metadata),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<K, V> Default for MockCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MockCache<K, V> {
    /// Creates a new empty mock cache reporting [`TierKind::Custom`] metadata
    /// with default attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metadata(TierMetadata::new(TierKind::Custom))
    }

    /// Creates a mock cache reporting the given metadata.
    #[must_use]
    pub fn with_metadata(metadata: TierMetadata) -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
            metadata: Arc::new(Mutex::new(metadata)),
            settings: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the reported metadata.
    pub fn set_metadata(&self, metadata: TierMetadata) {
        *self.metadata.lock() = metadata;
    }

    /// Returns the settings passed to [`CacheTier::apply_settings`], if any.
    #[must_use]
    pub fn applied_settings(&self) -> Option<TierSettings> {
        self.settings.lock().clone()
    }
}

impl<K, V> MockCache<K, V>
where
    K: Eq + std::hash::Hash,
{
    /// Creates a mock cache with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<K, CacheEntry<V>>) -> Self {
        let cache = Self::new();
        *cache.data.lock() = data;
        cache
    }

    /// Returns the number of entries in the cache.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the cache contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.lock().contains_key(key)
    }
}

impl<K, V> MockCache<K, V>
where
    K: Clone + Eq + std::hash::Hash,
    V: Clone,
{
    /// Returns the stored entry for a key, TTL override included.
    #[must_use]
    pub fn entry(&self, key: &K) -> Option<CacheEntry<V>> {
        self.data.lock().get(key).cloned()
    }
}

impl<K, V> MockCache<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should
    /// fail. Failed operations are still recorded.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&CacheOp<K, V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<CacheOp<K, V>> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn record(&self, op: CacheOp<K, V>) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &CacheOp<K, V>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

#[async_trait]
impl<K, V> CacheTier<K, V> for MockCache<K, V>
where
    K: CacheKey,
    V: CacheValue,
{
    fn metadata(&self) -> TierMetadata {
        *self.metadata.lock()
    }

    fn apply_settings(&self, settings: &TierSettings) {
        *self.settings.lock() = Some(settings.clone());
    }

    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        let op = CacheOp::Get(key.clone());
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::from_message("mock: get failed"));
        }
        Ok(self.data.lock().get(key).map(|entry| entry.value().clone()))
    }

    async fn get_many(&self, keys: &[K]) -> Result<HashMap<K, V>, Error> {
        let op = CacheOp::GetMany(keys.to_vec());
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::from_message("mock: get_many failed"));
        }
        let data = self.data.lock();
        Ok(keys
            .iter()
            .filter_map(|key| data.get(key).map(|entry| (key.clone(), entry.value().clone())))
            .collect())
    }

    async fn set(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        let op = CacheOp::Set {
            key: key.clone(),
            entry: entry.clone(),
        };
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::from_message("mock: set failed"));
        }
        if !self.metadata.lock().read_only {
            self.data.lock().insert(key.clone(), entry);
        }
        Ok(())
    }

    async fn set_many(&self, entries: &HashMap<K, CacheEntry<V>>, ttl: Option<Duration>) -> Result<(), Error> {
        let op = CacheOp::SetMany {
            count: entries.len(),
            ttl,
        };
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::from_message("mock: set_many failed"));
        }
        if !self.metadata.lock().read_only {
            let mut data = self.data.lock();
            for (key, entry) in entries {
                let mut entry = entry.clone();
                if entry.ttl().is_none()
                    && let Some(ttl) = ttl
                {
                    entry.set_ttl(ttl);
                }
                data.insert(key.clone(), entry);
            }
        }
        Ok(())
    }

    async fn delete(&self, keys: &[K]) -> Result<u64, Error> {
        let op = CacheOp::Delete(keys.to_vec());
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::from_message("mock: delete failed"));
        }
        let mut data = self.data.lock();
        Ok(keys.iter().filter(|key| data.remove(key).is_some()).count() as u64)
    }

    async fn flush(&self) -> Result<(), Error> {
        let op = CacheOp::Flush;
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::from_message("mock: flush failed"));
        }
        self.data.lock().clear();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.lock().len() as u64)
    }
}
