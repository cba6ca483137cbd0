// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Backend adapter contract for tiered cache orchestration.
//!
//! This crate defines the [`CacheTier`] trait that every cache backend must
//! satisfy, along with [`CacheEntry`] for values carrying a per-entry TTL
//! override, [`TierMetadata`] for the static attributes the orchestrator
//! reads when deciding probe order and promotion, and [`Error`] for fallible
//! operations.
//!
//! # Overview
//!
//! The adapter contract separates storage concerns from orchestration. A
//! backend implements [`CacheTier`] and reports its [`TierMetadata`]; the
//! `stratum` crate layers fallback-on-miss, concurrent fan-out, broadcast
//! writes, and write-back promotion on top without ever inspecting
//! backend-specific state.
//!
//! # Implementing a Cache Tier
//!
//! ```
//! use async_trait::async_trait;
//! use std::collections::HashMap;
//! use std::sync::Mutex;
//! use std::time::Duration;
//! use stratum_tier::{CacheEntry, CacheKey, CacheTier, CacheValue, Error, TierKind, TierMetadata};
//!
//! struct SimpleCache<K, V> {
//!     data: Mutex<HashMap<K, V>>,
//!     metadata: TierMetadata,
//! }
//!
//! #[async_trait]
//! impl<K: CacheKey, V: CacheValue> CacheTier<K, V> for SimpleCache<K, V> {
//!     fn metadata(&self) -> TierMetadata {
//!         self.metadata
//!     }
//!
//!     async fn get(&self, key: &K) -> Result<Option<V>, Error> {
//!         Ok(self.data.lock().unwrap().get(key).cloned())
//!     }
//!
//!     async fn get_many(&self, keys: &[K]) -> Result<HashMap<K, V>, Error> {
//!         let data = self.data.lock().unwrap();
//!         Ok(keys
//!             .iter()
//!             .filter_map(|k| data.get(k).map(|v| (k.clone(), v.clone())))
//!             .collect())
//!     }
//!
//!     async fn set(&self, key: &K, entry: CacheEntry<V>) -> Result<(), Error> {
//!         self.data.lock().unwrap().insert(key.clone(), entry.into_value());
//!         Ok(())
//!     }
//!
//!     async fn set_many(
//!         &self,
//!         entries: &HashMap<K, CacheEntry<V>>,
//!         _ttl: Option<Duration>,
//!     ) -> Result<(), Error> {
//!         let mut data = self.data.lock().unwrap();
//!         for (key, entry) in entries {
//!             data.insert(key.clone(), entry.value().clone());
//!         }
//!         Ok(())
//!     }
//!
//!     async fn delete(&self, keys: &[K]) -> Result<u64, Error> {
//!         let mut data = self.data.lock().unwrap();
//!         Ok(keys.iter().filter(|k| data.remove(k).is_some()).count() as u64)
//!     }
//!
//!     async fn flush(&self) -> Result<(), Error> {
//!         self.data.lock().unwrap().clear();
//!         Ok(())
//!     }
//! }
//! ```

mod entry;
pub mod error;
mod metadata;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub(crate) mod tier;

#[doc(inline)]
pub use entry::CacheEntry;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use metadata::{TierKind, TierMetadata, TierSettings};
#[doc(inline)]
pub use tier::{CacheKey, CacheTier, CacheValue};
