// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Construction-time configuration for the orchestrator and its tiers.

use std::sync::Arc;

use stratum_tier::{CacheTier, TierSettings};

#[cfg(feature = "memory")]
use stratum_memory::InMemoryCacheBuilder;

/// Process-wide settings applied uniformly to every tier at construction.
///
/// # Examples
///
/// ```
/// use stratum::CacheSettings;
///
/// let settings = CacheSettings {
///     namespace: "checkout".to_string(),
///     verbose: true,
///     ..CacheSettings::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Prefix propagated to every tier for key scoping.
    pub namespace: String,

    /// Enables per-operation debug logging.
    pub verbose: bool,

    /// Enables write-back of values found in slower tiers into faster ones.
    pub write_to_volatile_caches: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            verbose: false,
            write_to_volatile_caches: true,
        }
    }
}

impl CacheSettings {
    /// The per-tier view of these settings, handed to each backend when the
    /// chain is built.
    #[must_use]
    pub(crate) fn tier_settings(&self) -> TierSettings {
        TierSettings::new(self.namespace.clone(), self.verbose)
    }
}

/// Where a tier sits in the chain.
///
/// Primary tiers are consulted for every read and write. The overflow tier
/// is written to but never probed by reads; at most one is kept per chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierRole {
    /// Part of the ordered probe chain.
    Primary,
    /// Supplementary write target, excluded from reads and promotion.
    Overflow,
}

/// A connector that produces a networked backend when the chain is built.
///
/// Connection failures are non-fatal: the tier is skipped and the build
/// proceeds with the remaining entries.
pub type Connector<K, V> =
    Box<dyn FnOnce() -> Result<Arc<dyn CacheTier<K, V>>, stratum_tier::Error> + Send>;

/// How one tier's backend is obtained.
pub enum TierBackend<K, V> {
    /// An in-process cache, built from its builder when the chain is built.
    #[cfg(feature = "memory")]
    Memory(InMemoryCacheBuilder<K, V>),

    /// A networked cache, produced by a connector that may fail.
    Networked(Connector<K, V>),

    /// A caller-supplied backend, used as-is.
    Custom(Arc<dyn CacheTier<K, V>>),
}

impl<K, V> std::fmt::Debug for TierBackend<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(_) => write!(f, "Memory"),
            Self::Networked(_) => write!(f, "Networked(<connector>)"),
            Self::Custom(_) => write!(f, "Custom(<backend>)"),
        }
    }
}

/// Configuration for one tier in the chain.
///
/// Tiers are conventionally ordered fastest-first; the orchestrator compares
/// each tier's default expiration, not its index, when deciding where to
/// skip ahead and where to promote.
///
/// # Examples
///
/// ```
/// use stratum::{InMemoryCache, TierConfig};
///
/// let fast = TierConfig::memory(InMemoryCache::<String, i32>::builder());
/// let spill = TierConfig::memory(InMemoryCache::<String, i32>::builder()).overflow();
/// ```
#[derive(Debug)]
pub struct TierConfig<K, V> {
    pub(crate) backend: TierBackend<K, V>,
    pub(crate) role: TierRole,
}

impl<K, V> TierConfig<K, V> {
    /// Configures an in-process tier from a builder.
    #[cfg(feature = "memory")]
    #[must_use]
    pub fn memory(builder: InMemoryCacheBuilder<K, V>) -> Self {
        Self {
            backend: TierBackend::Memory(builder),
            role: TierRole::Primary,
        }
    }

    /// Configures a networked tier from a connector closure.
    ///
    /// The connector runs once, when the chain is built. If it fails the
    /// tier is logged and skipped rather than failing the whole build.
    #[must_use]
    pub fn networked<F>(connector: F) -> Self
    where
        F: FnOnce() -> Result<Arc<dyn CacheTier<K, V>>, stratum_tier::Error> + Send + 'static,
    {
        Self {
            backend: TierBackend::Networked(Box::new(connector)),
            role: TierRole::Primary,
        }
    }

    /// Configures a tier around a caller-supplied backend.
    #[must_use]
    pub fn custom(backend: Arc<dyn CacheTier<K, V>>) -> Self {
        Self {
            backend: TierBackend::Custom(backend),
            role: TierRole::Primary,
        }
    }

    /// Marks this tier as the overflow tier.
    ///
    /// The overflow tier receives all writes but is never consulted by
    /// reads. Only the first overflow entry in a configuration is kept.
    #[must_use]
    pub fn overflow(mut self) -> Self {
        self.role = TierRole::Overflow;
        self
    }

    /// This tier's role in the chain.
    #[must_use]
    pub fn role(&self) -> TierRole {
        self.role
    }
}
