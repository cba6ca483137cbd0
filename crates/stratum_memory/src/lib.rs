// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! In-process cache tier with per-entry expiration.
//!
//! This crate provides [`InMemoryCache`], a concurrent in-process backend for
//! the stratum tier chain. Entries expire lazily against the tokio clock, so
//! TTL behavior is fully testable under a paused runtime. Use
//! [`InMemoryCacheBuilder`] to configure the default expiration, read-only
//! mode, and skip-ahead eligibility.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use stratum_memory::InMemoryCacheBuilder;
//! use stratum_tier::{CacheEntry, CacheTier};
//!
//! # async fn example() {
//! let cache = InMemoryCacheBuilder::<String, i32>::new()
//!     .default_ttl(Duration::from_secs(300))
//!     .build();
//!
//! cache.set(&"key".to_string(), CacheEntry::new(42)).await.unwrap();
//! let value = cache.get(&"key".to_string()).await.unwrap();
//! assert_eq!(value, Some(42));
//! # }
//! ```
//!
//! Eviction policy is deliberately out of scope: this tier holds whatever is
//! written to it until the entry expires or is deleted.

pub mod builder;
pub mod tier;

#[doc(inline)]
pub use builder::InMemoryCacheBuilder;
#[doc(inline)]
pub use tier::InMemoryCache;
