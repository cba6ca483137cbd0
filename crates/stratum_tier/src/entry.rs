// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

use std::{ops::Deref, time::Duration};

/// A value to be cached, with an optional per-entry TTL override.
///
/// In batch writes, a `CacheEntry` carrying its own TTL overrides both the
/// batch-level expiration and the tier's default expiration for that one key.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stratum_tier::CacheEntry;
///
/// // Plain value; expiration is resolved by the receiving tier.
/// let entry = CacheEntry::new(42);
/// assert_eq!(*entry.value(), 42);
/// assert!(entry.ttl().is_none());
///
/// // Value with a per-entry override.
/// let entry = CacheEntry::with_ttl("data".to_string(), Duration::from_secs(60));
/// assert_eq!(entry.ttl(), Some(Duration::from_secs(60)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry<V> {
    value: V,
    ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    /// Creates an entry with no TTL override.
    ///
    /// The receiving tier applies the batch expiration if one was supplied,
    /// else its own default expiration.
    pub fn new(value: V) -> Self {
        Self { value, ttl: None }
    }

    /// Creates an entry with a per-entry TTL override.
    pub fn with_ttl(value: V, ttl: Duration) -> Self {
        Self { value, ttl: Some(ttl) }
    }

    /// Returns the per-entry TTL override, if set.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Sets the per-entry TTL override.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = Some(ttl);
    }

    /// Returns a reference to the value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry and returns the inner value.
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V> Deref for CacheEntry<V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<V> From<V> for CacheEntry<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}
