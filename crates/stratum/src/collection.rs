// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! The tier registry: turns an ordered list of tier configs into the
//! immutable chain the orchestrator reads from and writes to.

use std::sync::Arc;

use tracing::{debug, warn};

use stratum_tier::{CacheKey, CacheTier, CacheValue, TierMetadata};

use crate::config::{CacheSettings, TierBackend, TierConfig, TierRole};
use crate::error::ConfigurationError;

/// One usable tier: a backend handle plus the metadata it reported when the
/// chain was built.
///
/// Metadata is captured once here so the probe and promotion logic never has
/// to re-query a backend mid-operation.
pub(crate) struct Tier<K, V> {
    backend: Arc<dyn CacheTier<K, V>>,
    metadata: TierMetadata,
}

impl<K, V> Tier<K, V> {
    pub(crate) fn backend(&self) -> &dyn CacheTier<K, V> {
        self.backend.as_ref()
    }

    pub(crate) fn metadata(&self) -> TierMetadata {
        self.metadata
    }
}

impl<K, V> std::fmt::Debug for Tier<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tier").field("metadata", &self.metadata).finish_non_exhaustive()
    }
}

/// The ordered set of usable tiers, split into the primary probe chain and
/// at most one overflow tier.
///
/// Built once at orchestrator construction and read-only afterwards.
#[derive(Debug)]
pub(crate) struct TierChain<K, V> {
    primary: Vec<Tier<K, V>>,
    primary_metadata: Vec<TierMetadata>,
    overflow: Option<Tier<K, V>>,
}

impl<K, V> TierChain<K, V>
where
    K: CacheKey,
    V: CacheValue,
{
    /// Builds the chain from configuration.
    ///
    /// Entries are processed in order. A connector failure drops that entry
    /// and continues; surplus overflow entries are dropped. The build fails
    /// only when no primary tier survives.
    pub(crate) fn build(
        settings: &CacheSettings,
        configs: Vec<TierConfig<K, V>>,
    ) -> Result<Self, ConfigurationError> {
        let tier_settings = settings.tier_settings();
        let mut primary = Vec::new();
        let mut overflow = None;
        let mut primary_attempted = 0;

        for (index, config) in configs.into_iter().enumerate() {
            if config.role == TierRole::Primary {
                primary_attempted += 1;
            }

            let backend: Arc<dyn CacheTier<K, V>> = match config.backend {
                #[cfg(feature = "memory")]
                TierBackend::Memory(builder) => Arc::new(builder.build()),
                TierBackend::Networked(connector) => match connector() {
                    Ok(backend) => backend,
                    Err(error) => {
                        warn!(namespace = %settings.namespace, index, %error, "tier unavailable, skipping");
                        continue;
                    }
                },
                TierBackend::Custom(backend) => backend,
            };

            backend.apply_settings(&tier_settings);
            let metadata = backend.metadata();
            let tier = Tier { backend, metadata };

            match config.role {
                TierRole::Primary => primary.push(tier),
                TierRole::Overflow if overflow.is_none() => overflow = Some(tier),
                TierRole::Overflow => {
                    debug!(namespace = %settings.namespace, index, "extra overflow tier dropped");
                }
            }
        }

        if primary.is_empty() {
            return Err(ConfigurationError::NoPrimaryTiers {
                attempted: primary_attempted,
            });
        }

        let primary_metadata = primary.iter().map(Tier::metadata).collect();
        Ok(Self {
            primary,
            primary_metadata,
            overflow,
        })
    }

    /// The ordered probe chain. Never empty.
    pub(crate) fn primary(&self) -> &[Tier<K, V>] {
        &self.primary
    }

    /// Metadata for the primary chain, in probe order.
    pub(crate) fn primary_metadata(&self) -> &[TierMetadata] {
        &self.primary_metadata
    }

    /// The overflow tier, if one was configured.
    pub(crate) fn overflow(&self) -> Option<&Tier<K, V>> {
        self.overflow.as_ref()
    }

    /// All write targets in sweep order: primary tiers first, then overflow.
    ///
    /// The last tier yielded is the one designated to carry the caller's
    /// result for broadcast writes.
    pub(crate) fn write_targets(&self) -> impl Iterator<Item = &Tier<K, V>> {
        self.primary.iter().chain(self.overflow.as_ref())
    }

    /// Index of the designated result-carrying tier within the write sweep.
    pub(crate) fn designated_index(&self) -> usize {
        self.primary.len() + usize::from(self.overflow.is_some()) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_tier::testing::MockCache;
    use stratum_tier::{Error, TierKind, TierMetadata};

    fn custom(cache: MockCache<String, i32>) -> TierConfig<String, i32> {
        TierConfig::custom(Arc::new(cache))
    }

    #[test]
    fn build_fails_with_no_primary_tiers() {
        let result = TierChain::<String, i32>::build(&CacheSettings::default(), Vec::new());
        assert!(matches!(result, Err(ConfigurationError::NoPrimaryTiers { attempted: 0 })));
    }

    #[test]
    fn overflow_alone_does_not_satisfy_primary_requirement() {
        let configs = vec![custom(MockCache::new()).overflow()];
        let result = TierChain::build(&CacheSettings::default(), configs);
        assert!(matches!(result, Err(ConfigurationError::NoPrimaryTiers { attempted: 0 })));
    }

    #[test]
    fn connector_failure_skips_tier_without_failing_build() {
        let configs = vec![
            TierConfig::<String, i32>::networked(|| Err(Error::from_message("refused"))),
            custom(MockCache::new()),
        ];
        let chain = TierChain::build(&CacheSettings::default(), configs).expect("build failed");
        assert_eq!(chain.primary().len(), 1);
    }

    #[test]
    fn connector_failures_that_exhaust_primary_fail_build() {
        let configs = vec![
            TierConfig::<String, i32>::networked(|| Err(Error::from_message("refused"))),
            TierConfig::<String, i32>::networked(|| Err(Error::from_message("refused"))),
        ];
        let result = TierChain::build(&CacheSettings::default(), configs);
        assert!(matches!(result, Err(ConfigurationError::NoPrimaryTiers { attempted: 2 })));
    }

    #[test]
    fn surplus_overflow_tiers_are_dropped() {
        let kept = MockCache::with_metadata(TierMetadata::new(TierKind::Custom).read_only(true));
        let configs = vec![
            custom(MockCache::new()),
            custom(kept).overflow(),
            custom(MockCache::new()).overflow(),
        ];
        let chain = TierChain::build(&CacheSettings::default(), configs).expect("build failed");
        assert_eq!(chain.primary().len(), 1);
        let overflow = chain.overflow().expect("overflow missing");
        assert!(overflow.metadata().read_only);
    }

    #[test]
    fn settings_are_applied_to_every_tier() {
        let first = MockCache::<String, i32>::new();
        let second = MockCache::<String, i32>::new();
        let settings = CacheSettings {
            namespace: "ns".to_string(),
            verbose: true,
            ..CacheSettings::default()
        };
        let configs = vec![custom(first.clone()), custom(second.clone()).overflow()];
        TierChain::build(&settings, configs).expect("build failed");

        for cache in [first, second] {
            let applied = cache.applied_settings().expect("settings not applied");
            assert_eq!(applied.namespace, "ns");
            assert!(applied.verbose);
        }
    }

    #[test]
    fn designated_index_is_last_of_final_list() {
        let configs = vec![custom(MockCache::new()), custom(MockCache::new())];
        let chain = TierChain::build(&CacheSettings::default(), configs).expect("build failed");
        assert_eq!(chain.designated_index(), 1);

        let configs = vec![
            custom(MockCache::new()),
            custom(MockCache::new()),
            custom(MockCache::new()).overflow(),
        ];
        let chain = TierChain::build(&CacheSettings::default(), configs).expect("build failed");
        assert_eq!(chain.designated_index(), 2);
        assert_eq!(chain.write_targets().count(), 3);
    }
}
