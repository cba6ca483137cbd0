// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Builder for configuring a [`CacheService`].

use crate::config::{CacheSettings, TierConfig};
use crate::error::ConfigurationError;
use crate::service::CacheService;
use stratum_tier::{CacheKey, CacheValue};

/// Builder for configuring a [`CacheService`].
///
/// Tiers are probed in the order they are added; put the fastest,
/// shortest-lived tier first.
///
/// # Examples
///
/// ```no_run
/// use stratum::{CacheService, InMemoryCache, TierConfig};
///
/// # async fn example() {
/// let cache = CacheService::<String, i32>::builder()
///     .namespace("sessions")
///     .tier(TierConfig::memory(InMemoryCache::builder()))
///     .build()
///     .unwrap();
/// # }
/// ```
#[derive(Debug)]
pub struct CacheServiceBuilder<K, V> {
    settings: CacheSettings,
    tiers: Vec<TierConfig<K, V>>,
}

impl<K, V> Default for CacheServiceBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheServiceBuilder<K, V> {
    /// Creates a builder with default settings and no tiers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: CacheSettings::default(),
            tiers: Vec::new(),
        }
    }

    /// Sets the namespace propagated to every tier for key scoping.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.settings.namespace = namespace.into();
        self
    }

    /// Enables per-operation debug logging.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.settings.verbose = verbose;
        self
    }

    /// Enables or disables write-back promotion into faster tiers.
    #[must_use]
    pub fn write_to_volatile_caches(mut self, enabled: bool) -> Self {
        self.settings.write_to_volatile_caches = enabled;
        self
    }

    /// Appends a tier to the chain.
    #[must_use]
    pub fn tier(mut self, config: TierConfig<K, V>) -> Self {
        self.tiers.push(config);
        self
    }
}

impl<K, V> CacheServiceBuilder<K, V>
where
    K: CacheKey,
    V: CacheValue,
{
    /// Builds the configured [`CacheService`].
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigurationError::NoPrimaryTiers`] when no usable
    /// primary tier remains after processing the configuration.
    pub fn build(self) -> Result<CacheService<K, V>, ConfigurationError> {
        CacheService::new(self.settings, self.tiers)
    }
}
