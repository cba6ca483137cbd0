// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Behavior tests for the in-process tier, run under a paused tokio clock so
//! expiration is deterministic.

use std::collections::HashMap;
use std::time::Duration;

use stratum_memory::InMemoryCache;
use stratum_tier::{CacheEntry, CacheTier, TierKind};

#[tokio::test(start_paused = true)]
async fn set_then_get_roundtrip() {
    let cache = InMemoryCache::<String, String>::new();
    cache
        .set(&"key".to_string(), CacheEntry::new("value".to_string()))
        .await
        .expect("set failed");

    let value = cache.get(&"key".to_string()).await.expect("get failed");
    assert_eq!(value, Some("value".to_string()));
}

#[tokio::test(start_paused = true)]
async fn entry_expires_after_ttl() {
    let cache = InMemoryCache::<String, i32>::new();
    cache
        .set(&"key".to_string(), CacheEntry::with_ttl(1, Duration::from_secs(1)))
        .await
        .expect("set failed");

    tokio::time::advance(Duration::from_millis(900)).await;
    assert_eq!(cache.get(&"key".to_string()).await.expect("get failed"), Some(1));

    tokio::time::advance(Duration::from_millis(200)).await;
    assert_eq!(cache.get(&"key".to_string()).await.expect("get failed"), None);
}

#[tokio::test(start_paused = true)]
async fn default_ttl_applies_when_entry_has_no_override() {
    let cache = InMemoryCache::<String, i32>::builder()
        .default_ttl(Duration::from_secs(10))
        .build();
    cache.set(&"key".to_string(), CacheEntry::new(1)).await.expect("set failed");

    tokio::time::advance(Duration::from_secs(11)).await;
    assert_eq!(cache.get(&"key".to_string()).await.expect("get failed"), None);
}

#[tokio::test(start_paused = true)]
async fn batch_ttl_and_per_entry_override() {
    let cache = InMemoryCache::<String, i32>::new();
    let entries: HashMap<_, _> = [
        ("a".to_string(), CacheEntry::new(1)),
        ("b".to_string(), CacheEntry::with_ttl(2, Duration::from_secs(1))),
        ("c".to_string(), CacheEntry::new(3)),
    ]
    .into();
    cache
        .set_many(&entries, Some(Duration::from_secs(60)))
        .await
        .expect("set_many failed");

    // Past the override but inside the batch TTL: only `b` is gone.
    tokio::time::advance(Duration::from_secs(2)).await;
    let keys = ["a".to_string(), "b".to_string(), "c".to_string()];
    let found = cache.get_many(&keys).await.expect("get_many failed");
    assert_eq!(found.get("a"), Some(&1));
    assert!(!found.contains_key("b"));
    assert_eq!(found.get("c"), Some(&3));
}

#[tokio::test(start_paused = true)]
async fn get_many_omits_absent_keys() {
    let cache = InMemoryCache::<String, i32>::new();
    cache.set(&"a".to_string(), CacheEntry::new(1)).await.expect("set failed");

    let keys = ["a".to_string(), "missing".to_string()];
    let found = cache.get_many(&keys).await.expect("get_many failed");
    assert_eq!(found.len(), 1);
    assert!(!found.contains_key("missing"));
}

#[tokio::test(start_paused = true)]
async fn delete_counts_removed_keys() {
    let cache = InMemoryCache::<String, i32>::new();
    cache.set(&"a".to_string(), CacheEntry::new(1)).await.expect("set failed");
    cache.set(&"b".to_string(), CacheEntry::new(2)).await.expect("set failed");

    let keys = ["a".to_string(), "b".to_string(), "missing".to_string()];
    let count = cache.delete(&keys).await.expect("delete failed");
    assert_eq!(count, 2);
    assert_eq!(cache.get(&"a".to_string()).await.expect("get failed"), None);
}

#[tokio::test(start_paused = true)]
async fn flush_is_idempotent() {
    let cache = InMemoryCache::<String, i32>::new();
    cache.set(&"a".to_string(), CacheEntry::new(1)).await.expect("set failed");

    cache.flush().await.expect("flush failed");
    assert_eq!(cache.len(), Some(0));
    cache.flush().await.expect("second flush failed");
    assert_eq!(cache.len(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn read_only_tier_ignores_writes() {
    let cache = InMemoryCache::<String, i32>::builder().read_only(true).build();
    cache.set(&"key".to_string(), CacheEntry::new(1)).await.expect("set failed");
    cache
        .set_many(&HashMap::from([("k2".to_string(), CacheEntry::new(2))]), None)
        .await
        .expect("set_many failed");

    assert_eq!(cache.len(), Some(0));
    assert!(cache.metadata().read_only);
}

#[tokio::test(start_paused = true)]
async fn clone_shares_storage() {
    let cache = InMemoryCache::<String, i32>::new();
    let handle = cache.clone();
    cache.set(&"key".to_string(), CacheEntry::new(5)).await.expect("set failed");

    assert_eq!(handle.get(&"key".to_string()).await.expect("get failed"), Some(5));
}

#[tokio::test(start_paused = true)]
async fn reports_memory_kind_metadata() {
    let cache = InMemoryCache::<String, i32>::new();
    let metadata = cache.metadata();
    assert_eq!(metadata.kind, TierKind::Memory);
    assert_eq!(metadata.default_ttl, Duration::from_secs(900));
    assert!(metadata.skip_ahead_on_miss);
}
