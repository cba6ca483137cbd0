// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Tests for the `CacheTier` contract through dynamic dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use stratum_tier::{CacheEntry, CacheKey, CacheTier, CacheValue, Error, TierKind, TierMetadata, TierSettings};

/// A minimal adapter that stores entries without expiring them.
struct PlainCache<K, V> {
    data: Mutex<HashMap<K, V>>,
    metadata: TierMetadata,
}

impl<K, V> PlainCache<K, V> {
    fn new(metadata: TierMetadata) -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            metadata,
        }
    }
}

#[async_trait]
impl<K: CacheKey, V: CacheValue> CacheTier<K, V> for PlainCache<K, V> {
    fn metadata(&self) -> TierMetadata {
        self.metadata
    }

    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        Ok(self.data.lock().get(key).cloned())
    }

    async fn get_many(&self, keys: &[K]) -> Result<HashMap<K, V>, Error> {
        let data = self.data.lock();
        Ok(keys
            .iter()
            .filter_map(|key| data.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }

    async fn set(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
        self.data.lock().insert(key.clone(), entry.into_value());
        Ok(())
    }

    async fn set_many(&self, entries: &HashMap<K, CacheEntry<V>>, _ttl: Option<Duration>) -> Result<(), Error> {
        let mut data = self.data.lock();
        for (key, entry) in entries {
            data.insert(key.clone(), entry.value().clone());
        }
        Ok(())
    }

    async fn delete(&self, keys: &[K]) -> Result<u64, Error> {
        let mut data = self.data.lock();
        Ok(keys.iter().filter(|key| data.remove(key).is_some()).count() as u64)
    }

    async fn flush(&self) -> Result<(), Error> {
        self.data.lock().clear();
        Ok(())
    }
}

fn dyn_cache() -> Arc<dyn CacheTier<String, i32>> {
    Arc::new(PlainCache::new(TierMetadata::new(TierKind::Custom)))
}

#[tokio::test]
async fn roundtrip_through_trait_object() {
    let cache = dyn_cache();
    cache.set(&"key".to_string(), CacheEntry::new(42)).await.expect("set failed");
    let value = cache.get(&"key".to_string()).await.expect("get failed");
    assert_eq!(value, Some(42));
}

#[tokio::test]
async fn get_many_returns_only_found_keys() {
    let cache = dyn_cache();
    cache.set(&"a".to_string(), CacheEntry::new(1)).await.expect("set failed");
    cache.set(&"b".to_string(), CacheEntry::new(2)).await.expect("set failed");

    let keys = ["a".to_string(), "b".to_string(), "missing".to_string()];
    let found = cache.get_many(&keys).await.expect("get_many failed");
    assert_eq!(found.len(), 2);
    assert_eq!(found.get("a"), Some(&1));
    assert!(!found.contains_key("missing"));
}

#[tokio::test]
async fn delete_reports_removed_count() {
    let cache = dyn_cache();
    cache.set(&"a".to_string(), CacheEntry::new(1)).await.expect("set failed");

    let keys = ["a".to_string(), "missing".to_string()];
    let count = cache.delete(&keys).await.expect("delete failed");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn len_defaults_to_unsupported() {
    let cache = dyn_cache();
    assert!(cache.len().is_none());
    assert!(cache.is_empty().is_none());
}

#[tokio::test]
async fn apply_settings_defaults_to_noop() {
    let cache = dyn_cache();
    cache.apply_settings(&TierSettings::new("ns", true));
    // Still fully operational afterwards.
    cache.flush().await.expect("flush failed");
}
