// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Static tier attributes and shared construction-time settings.

use std::{fmt, time::Duration};

/// The kind of backend behind a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierKind {
    /// An in-process cache.
    Memory,
    /// A cache reached over the network.
    Networked,
    /// A caller-supplied adapter.
    Custom,
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Networked => write!(f, "networked"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Static attributes of a tier, reported by its adapter.
///
/// The orchestrator captures metadata once at construction and uses it for
/// skip-ahead and promotion decisions; it never re-queries the adapter.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stratum_tier::{TierKind, TierMetadata};
///
/// let metadata = TierMetadata::new(TierKind::Memory)
///     .default_ttl(Duration::from_secs(60))
///     .read_only(true);
/// assert_eq!(metadata.default_ttl, Duration::from_secs(60));
/// assert!(metadata.skip_ahead_on_miss);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierMetadata {
    /// The kind of backend behind this tier.
    pub kind: TierKind,
    /// Expiration applied to entries without an explicit TTL.
    pub default_ttl: Duration,
    /// Read-only tiers silently ignore writes.
    pub read_only: bool,
    /// Whether this tier is worth probing when the previous tier missed,
    /// regardless of relative expiration times.
    pub skip_ahead_on_miss: bool,
}

impl TierMetadata {
    /// Default expiration for tiers that don't configure one.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(900);

    /// Creates metadata with the default attributes for the given kind.
    #[must_use]
    pub fn new(kind: TierKind) -> Self {
        Self {
            kind,
            default_ttl: Self::DEFAULT_TTL,
            read_only: false,
            skip_ahead_on_miss: true,
        }
    }

    /// Sets the default expiration.
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Marks the tier read-only.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sets skip-ahead eligibility on miss.
    #[must_use]
    pub fn skip_ahead_on_miss(mut self, skip_ahead: bool) -> Self {
        self.skip_ahead_on_miss = skip_ahead;
        self
    }
}

/// Shared settings the tier registry injects into every adapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TierSettings {
    /// Key-scoping prefix for backends shared between processes.
    pub namespace: String,
    /// Enables operation-level logging in adapters that honor it.
    pub verbose: bool,
}

impl TierSettings {
    /// Creates settings with the given namespace and verbosity.
    #[must_use]
    pub fn new(namespace: impl Into<String>, verbose: bool) -> Self {
        Self {
            namespace: namespace.into(),
            verbose,
        }
    }
}
