// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Builder for configuring in-process caches.

use std::marker::PhantomData;
use std::time::Duration;

use stratum_tier::{TierKind, TierMetadata};

use crate::tier::InMemoryCache;

/// Builder for configuring an [`InMemoryCache`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stratum_memory::InMemoryCache;
///
/// let cache = InMemoryCache::<String, i32>::builder()
///     .default_ttl(Duration::from_secs(300))
///     .skip_ahead_on_miss(false)
///     .build();
/// ```
#[derive(Debug)]
pub struct InMemoryCacheBuilder<K, V> {
    pub(crate) metadata: TierMetadata,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> Default for InMemoryCacheBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryCacheBuilder<K, V> {
    /// Creates a new builder with default settings.
    ///
    /// Defaults: 900 s expiration, writable, skip-ahead eligible.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: TierMetadata::new(TierKind::Memory),
            _phantom: PhantomData,
        }
    }

    /// Sets the expiration applied to entries written without their own TTL.
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.metadata = self.metadata.default_ttl(ttl);
        self
    }

    /// Makes the tier ignore all writes.
    ///
    /// Read-only tiers are still probed and still participate in delete and
    /// flush sweeps.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.metadata = self.metadata.read_only(read_only);
        self
    }

    /// Sets whether this tier should be probed when the previous tier
    /// missed, regardless of relative expiration times.
    #[must_use]
    pub fn skip_ahead_on_miss(mut self, skip_ahead: bool) -> Self {
        self.metadata = self.metadata.skip_ahead_on_miss(skip_ahead);
        self
    }

    /// Builds the configured [`InMemoryCache`].
    #[must_use]
    pub fn build(self) -> InMemoryCache<K, V> {
        InMemoryCache::from_builder(&self)
    }
}
