// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! A tiered cache orchestration layer.
//!
//! `stratum` presents a single key/value cache API over an ordered chain of
//! heterogeneous cache backends. The orchestrator decides which tiers to
//! query, in what order, how to interpret partial or erroring responses, and
//! how to propagate found values back into faster tiers. Backends plug in
//! through the [`CacheTier`] trait from `stratum_tier`.
//!
//! # Behavior
//!
//! - **Reads fall back.** [`CacheService::get`] probes primary tiers one at
//!   a time, skipping ahead past tiers that cannot hold the key any longer
//!   and falling through tiers that error. [`CacheService::mget`] queries
//!   every primary tier at once and races the responses, accepting the
//!   first complete answer or the largest partial one.
//! - **Writes broadcast.** [`CacheService::set`], [`mset`], [`del`], and
//!   [`flush`] sweep every tier, primary then overflow. One tier carries
//!   the caller's result; failures elsewhere are logged and absorbed.
//! - **Found values are promoted.** A value resolved from a slower tier is
//!   written back into the faster tiers in front of it, so the next read
//!   hits earlier in the chain.
//!
//! [`mset`]: CacheService::mset
//! [`del`]: CacheService::del
//! [`flush`]: CacheService::flush
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use stratum::{CacheService, InMemoryCache, TierConfig};
//!
//! # async fn example() {
//! let cache = CacheService::builder()
//!     .namespace("sessions")
//!     .tier(TierConfig::memory(
//!         InMemoryCache::<String, String>::builder().default_ttl(Duration::from_secs(60)),
//!     ))
//!     .tier(TierConfig::memory(
//!         InMemoryCache::<String, String>::builder().default_ttl(Duration::from_secs(900)),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! cache.set(&"user:42".to_string(), "profile".to_string()).await.unwrap();
//! let value = cache.get(&"user:42".to_string()).await.unwrap();
//! assert_eq!(value, Some("profile".to_string()));
//! # }
//! ```
//!
//! # Failure Tolerance
//!
//! Backend failures never take the cache down. A tier that errors during a
//! read is skipped; a tier whose connector fails at construction is dropped
//! from the chain. Construction fails only when nothing is left to serve
//! reads from, and reads report a miss rather than an error when every tier
//! fails.

pub mod builder;
mod collection;
pub mod config;
pub mod error;
mod probe;
pub mod service;

#[doc(inline)]
pub use builder::CacheServiceBuilder;
#[doc(inline)]
pub use config::{CacheSettings, Connector, TierBackend, TierConfig, TierRole};
#[doc(inline)]
pub use error::{ArgumentError, ConfigurationError, Error, Result};
#[doc(inline)]
pub use service::CacheService;

pub use stratum_tier::{CacheEntry, CacheKey, CacheTier, CacheValue, TierKind, TierMetadata, TierSettings};

#[cfg(feature = "memory")]
pub use stratum_memory::{InMemoryCache, InMemoryCacheBuilder};
