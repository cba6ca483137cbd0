// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! The core trait for cache storage backends.
//!
//! [`CacheTier`] defines the capability surface the orchestrator consumes.
//! Implement the storage operations and report [`TierMetadata`]; the
//! `stratum` crate layers fallback, fan-out, and promotion on top.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use async_trait::async_trait;

use crate::{CacheEntry, Error, TierMetadata, TierSettings};

/// Bound alias for cache key types.
pub trait CacheKey: Clone + Eq + Hash + Send + Sync + 'static {}
impl<T: Clone + Eq + Hash + Send + Sync + 'static> CacheKey for T {}

/// Bound alias for cache value types.
pub trait CacheValue: Clone + Send + Sync + 'static {}
impl<T: Clone + Send + Sync + 'static> CacheValue for T {}

/// Trait for cache tier backends.
///
/// Implement this trait to plug a storage backend into the orchestration
/// chain. The orchestrator holds tiers as `Arc<dyn CacheTier<K, V>>` and
/// never inspects backend-specific state; everything it needs to know about
/// a tier comes from [`metadata`](Self::metadata).
///
/// Backends own their connection lifecycle, internal timeouts, and retry
/// behavior. The orchestrator assumes implementations are safe for
/// concurrent invocation.
#[async_trait]
pub trait CacheTier<K, V>: Send + Sync
where
    K: CacheKey,
    V: CacheValue,
{
    /// Reports the static attributes of this tier.
    ///
    /// The orchestrator captures this once when the tier chain is built;
    /// implementations must return the same values for the lifetime of the
    /// adapter.
    fn metadata(&self) -> TierMetadata;

    /// Applies the shared namespace/verbosity settings to this tier.
    ///
    /// Called once by the tier registry during construction. Process-local
    /// backends typically ignore the namespace; networked backends use it
    /// for key scoping. The default implementation does nothing.
    fn apply_settings(&self, _settings: &TierSettings) {}

    /// Gets a value, returning an error if the operation fails.
    ///
    /// `Ok(None)` means the key is absent (or expired); any present value,
    /// including falsy ones, is a hit.
    async fn get(&self, key: &K) -> Result<Option<V>, Error>;

    /// Gets multiple values, returning a mapping of only the keys found.
    async fn get_many(&self, keys: &[K]) -> Result<HashMap<K, V>, Error>;

    /// Stores a value. A no-op if the tier is read-only.
    ///
    /// The entry's TTL override, when present, takes precedence over the
    /// tier's default expiration.
    async fn set(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error>;

    /// Stores multiple values. A no-op if the tier is read-only.
    ///
    /// Effective expiration per key: the entry's own TTL override, else
    /// `ttl`, else the tier's default expiration.
    async fn set_many(&self, entries: &HashMap<K, CacheEntry<V>>, ttl: Option<Duration>) -> Result<(), Error>;

    /// Deletes the given keys, returning how many were removed.
    async fn delete(&self, keys: &[K]) -> Result<u64, Error>;

    /// Removes every entry from this tier.
    async fn flush(&self) -> Result<(), Error>;

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the cache contains no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}
