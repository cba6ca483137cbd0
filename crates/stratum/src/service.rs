// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! The cache orchestrator: a single key/value API over an ordered chain of
//! cache backends.

use std::collections::HashMap;
use std::time::Duration;

use futures::StreamExt;
use futures::future::join_all;
use futures::stream::FuturesUnordered;
use tracing::{debug, warn};

use stratum_tier::{CacheEntry, CacheKey, CacheValue};

use crate::builder::CacheServiceBuilder;
use crate::collection::TierChain;
use crate::config::{CacheSettings, TierConfig};
use crate::error::{ArgumentError, ConfigurationError, Error, Result};
use crate::probe::ProbePlan;

/// A tiered cache.
///
/// Reads probe the primary chain in order, falling back on miss or error
/// until a tier answers, then write the found value back into faster tiers.
/// Writes sweep every tier, primary then overflow; only the last tier's
/// outcome is surfaced to the caller, all other failures are logged and
/// absorbed.
///
/// The tier chain is built once at construction and never changes, so a
/// `CacheService` can be shared freely across tasks.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use stratum::{CacheService, InMemoryCache, TierConfig};
///
/// # async fn example() {
/// let cache = CacheService::builder()
///     .tier(TierConfig::memory(
///         InMemoryCache::<String, i32>::builder().default_ttl(Duration::from_secs(60)),
///     ))
///     .tier(TierConfig::memory(
///         InMemoryCache::<String, i32>::builder().default_ttl(Duration::from_secs(600)),
///     ))
///     .build()
///     .unwrap();
///
/// cache.set(&"key".to_string(), 42).await.unwrap();
/// assert_eq!(cache.get(&"key".to_string()).await.unwrap(), Some(42));
/// # }
/// ```
pub struct CacheService<K, V> {
    chain: TierChain<K, V>,
    namespace: String,
    verbose: bool,
    write_to_volatile_caches: bool,
}

impl<K, V> std::fmt::Debug for CacheService<K, V>
where
    K: CacheKey,
    V: CacheValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("namespace", &self.namespace)
            .field("tiers", &self.chain.primary().len())
            .field("overflow", &self.chain.overflow().is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> CacheService<K, V>
where
    K: CacheKey,
    V: CacheValue,
{
    /// Builds a service from settings and an ordered list of tier configs.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigurationError::NoPrimaryTiers`] when no usable
    /// primary tier remains after processing the configuration.
    pub fn new(settings: CacheSettings, tiers: Vec<TierConfig<K, V>>) -> Result<Self, ConfigurationError> {
        let chain = TierChain::build(&settings, tiers)?;
        Ok(Self {
            chain,
            namespace: settings.namespace,
            verbose: settings.verbose,
            write_to_volatile_caches: settings.write_to_volatile_caches,
        })
    }

    /// Creates a new builder for configuring a [`CacheService`].
    #[must_use]
    pub fn builder() -> CacheServiceBuilder<K, V> {
        CacheServiceBuilder::new()
    }

    /// Looks up a key, probing primary tiers in order.
    ///
    /// A tier miss skips ahead to the next tier worth checking; a tier error
    /// falls through to the next tier in order. When a value surfaces from a
    /// tier past the first, it is written back into the faster tiers before
    /// returning. If every tier misses or fails the result is `Ok(None)`;
    /// backend errors during a probe are never surfaced.
    pub async fn get(&self, key: &K) -> Result<Option<V>> {
        let primary = self.chain.primary();
        let mut plan = ProbePlan::new(self.chain.primary_metadata());

        while let Some(index) = plan.current() {
            match primary[index].backend().get(key).await {
                Ok(Some(value)) => {
                    plan.on_hit();
                    if self.verbose {
                        debug!(namespace = %self.namespace, tier = index, "get hit");
                    }
                    self.promote_one(key, &value, index).await;
                    return Ok(Some(value));
                }
                Ok(None) => plan.on_miss(),
                Err(error) => {
                    warn!(namespace = %self.namespace, tier = index, %error, "get failed, falling through");
                    plan.on_error();
                }
            }
        }

        if self.verbose {
            debug!(namespace = %self.namespace, "get miss");
        }
        Ok(None)
    }

    /// Looks up many keys at once, querying all primary tiers concurrently.
    ///
    /// The first tier to return every requested key wins and outstanding
    /// queries are dropped. If no tier has them all, the largest partial
    /// result is kept, earliest responder winning ties. The accepted mapping
    /// is written back into tiers faster than the one that produced it. Keys
    /// not found anywhere are simply absent from the mapping.
    ///
    /// # Errors
    ///
    /// Fails with [`ArgumentError`] when `keys` is empty.
    pub async fn mget(&self, keys: &[K]) -> Result<HashMap<K, V>> {
        if keys.is_empty() {
            return Err(ArgumentError::new("mget", "at least one key").into());
        }

        let primary = self.chain.primary();
        let mut pending: FuturesUnordered<_> = primary
            .iter()
            .enumerate()
            .map(|(index, tier)| async move { (index, tier.backend().get_many(keys).await) })
            .collect();

        let mut best: Option<(usize, HashMap<K, V>)> = None;
        while let Some((index, result)) = pending.next().await {
            match result {
                Ok(found) if found.len() == keys.len() => {
                    drop(pending);
                    if self.verbose {
                        debug!(namespace = %self.namespace, tier = index, keys = keys.len(), "mget complete hit");
                    }
                    self.promote_many(&found, index).await;
                    return Ok(found);
                }
                Ok(found) => {
                    if best.as_ref().is_none_or(|(_, held)| found.len() > held.len()) {
                        best = Some((index, found));
                    }
                }
                Err(error) => {
                    warn!(namespace = %self.namespace, tier = index, %error, "mget failed on tier");
                }
            }
        }

        match best {
            Some((index, found)) => {
                if self.verbose {
                    debug!(namespace = %self.namespace, tier = index, found = found.len(), keys = keys.len(), "mget partial hit");
                }
                self.promote_many(&found, index).await;
                Ok(found)
            }
            None => Ok(HashMap::new()),
        }
    }

    /// Writes one key to every tier.
    ///
    /// All tiers are written concurrently. Only the outcome of the last tier
    /// in the sweep (the overflow tier if configured, else the last primary
    /// tier) is surfaced; failures elsewhere are logged and absorbed.
    ///
    /// The value may be a plain `V` or a [`CacheEntry`] carrying a TTL that
    /// overrides the receiving tier's default expiration.
    pub async fn set(&self, key: &K, entry: impl Into<CacheEntry<V>>) -> Result<()> {
        let entry = entry.into();
        let designated = self.chain.designated_index();
        let writes = self.chain.write_targets().enumerate().map(|(index, tier)| {
            let entry = entry.clone();
            async move { (index, tier.backend().set(key, entry).await) }
        });

        let mut outcome = Ok(());
        for (index, result) in join_all(writes).await {
            if let Err(error) = result {
                if index == designated {
                    outcome = Err(Error::from(error));
                } else {
                    warn!(namespace = %self.namespace, tier = index, %error, "set failed on tier");
                }
            }
        }
        outcome
    }

    /// Writes many keys to every tier.
    ///
    /// `ttl` applies to entries without their own TTL override; entries
    /// carrying one keep it. A tier without an applicable TTL falls back to
    /// its own default expiration. Error surfacing follows the same
    /// designated-tier rule as [`CacheService::set`].
    ///
    /// # Errors
    ///
    /// Fails with [`ArgumentError`] when `entries` is empty.
    pub async fn mset(&self, entries: HashMap<K, CacheEntry<V>>, ttl: Option<Duration>) -> Result<()> {
        if entries.is_empty() {
            return Err(ArgumentError::new("mset", "at least one entry").into());
        }

        let designated = self.chain.designated_index();
        let entries = &entries;
        let writes = self
            .chain
            .write_targets()
            .enumerate()
            .map(|(index, tier)| async move { (index, tier.backend().set_many(entries, ttl).await) });

        let mut outcome = Ok(());
        for (index, result) in join_all(writes).await {
            if let Err(error) = result {
                if index == designated {
                    outcome = Err(Error::from(error));
                } else {
                    warn!(namespace = %self.namespace, tier = index, %error, "mset failed on tier");
                }
            }
        }
        outcome
    }

    /// Deletes keys from every tier.
    ///
    /// Returns the number of keys the designated tier reported deleting.
    /// Counts from other tiers are discarded, and their failures logged.
    ///
    /// # Errors
    ///
    /// Fails with [`ArgumentError`] when `keys` is empty.
    pub async fn del(&self, keys: &[K]) -> Result<u64> {
        if keys.is_empty() {
            return Err(ArgumentError::new("del", "at least one key").into());
        }

        let designated = self.chain.designated_index();
        let deletes = self
            .chain
            .write_targets()
            .enumerate()
            .map(|(index, tier)| async move { (index, tier.backend().delete(keys).await) });

        let mut deleted = 0;
        for (index, result) in join_all(deletes).await {
            match result {
                Ok(count) => {
                    if index == designated {
                        deleted = count;
                    }
                }
                Err(error) if index == designated => return Err(Error::from(error)),
                Err(error) => {
                    warn!(namespace = %self.namespace, tier = index, %error, "del failed on tier");
                }
            }
        }
        Ok(deleted)
    }

    /// Clears every tier.
    ///
    /// Error surfacing follows the designated-tier rule: only the last
    /// tier's failure reaches the caller.
    pub async fn flush(&self) -> Result<()> {
        let designated = self.chain.designated_index();
        let flushes = self
            .chain
            .write_targets()
            .enumerate()
            .map(|(index, tier)| async move { (index, tier.backend().flush().await) });

        let mut outcome = Ok(());
        for (index, result) in join_all(flushes).await {
            if let Err(error) = result {
                if index == designated {
                    outcome = Err(Error::from(error));
                } else {
                    warn!(namespace = %self.namespace, tier = index, %error, "flush failed on tier");
                }
            }
        }
        outcome
    }

    /// Entry count reported by the first primary tier, if it tracks one.
    #[must_use]
    pub fn len(&self) -> Option<u64> {
        self.chain.primary()[0].backend().len()
    }

    /// Whether the first primary tier reports itself empty.
    #[must_use]
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    /// Writes a value found at tier `found_at` into the faster tiers.
    ///
    /// Only tiers whose default expiration does not exceed the source
    /// tier's are written; a longer-lived earlier tier would otherwise
    /// outhold the tier the value came from. Failures are logged and
    /// absorbed.
    async fn promote_one(&self, key: &K, value: &V, found_at: usize) {
        if !self.write_to_volatile_caches || found_at == 0 {
            return;
        }
        let primary = self.chain.primary();
        let source_ttl = primary[found_at].metadata().default_ttl;
        let writes = primary[..found_at]
            .iter()
            .enumerate()
            .filter(|(_, tier)| tier.metadata().default_ttl <= source_ttl)
            .map(|(index, tier)| async move { (index, tier.backend().set(key, CacheEntry::new(value.clone())).await) });

        for (index, result) in join_all(writes).await {
            if let Err(error) = result {
                warn!(namespace = %self.namespace, tier = index, %error, "promotion failed");
            }
        }
    }

    /// Batch counterpart of [`Self::promote_one`] for accepted mget results.
    async fn promote_many(&self, found: &HashMap<K, V>, found_at: usize) {
        if !self.write_to_volatile_caches || found_at == 0 || found.is_empty() {
            return;
        }
        let entries: HashMap<K, CacheEntry<V>> = found
            .iter()
            .map(|(key, value)| (key.clone(), CacheEntry::new(value.clone())))
            .collect();
        let entries = &entries;

        let primary = self.chain.primary();
        let source_ttl = primary[found_at].metadata().default_ttl;
        let writes = primary[..found_at]
            .iter()
            .enumerate()
            .filter(|(_, tier)| tier.metadata().default_ttl <= source_ttl)
            .map(|(index, tier)| async move { (index, tier.backend().set_many(entries, None).await) });

        for (index, result) in join_all(writes).await {
            if let Err(error) = result {
                warn!(namespace = %self.namespace, tier = index, %error, "promotion failed");
            }
        }
    }
}
