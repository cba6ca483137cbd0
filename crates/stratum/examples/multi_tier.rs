// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Two-tier chain demonstrating fallback-on-miss and write-back promotion.
//!
//! The fast tier holds entries for a minute, the slow tier for fifteen. A
//! value evicted from the fast tier is re-found in the slow tier and
//! promoted forward, so the next read hits the fast tier again.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use stratum::{CacheService, CacheTier, InMemoryCache, TierConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let fast = InMemoryCache::<String, i64>::builder()
        .default_ttl(Duration::from_secs(60))
        .build();
    let slow = InMemoryCache::<String, i64>::builder()
        .default_ttl(Duration::from_secs(900))
        .build();

    let cache = CacheService::builder()
        .namespace("example")
        .verbose(true)
        .tier(TierConfig::custom(Arc::new(fast.clone())))
        .tier(TierConfig::custom(Arc::new(slow.clone())))
        .build()?;

    cache.set(&"visits".to_string(), 41).await?;

    // Simulate the fast tier losing the entry.
    fast.delete(&["visits".to_string()]).await?;
    println!("fast tier after eviction: {:?}", fast.get(&"visits".to_string()).await?);

    // The read falls back to the slow tier and promotes the value forward.
    let value = cache.get(&"visits".to_string()).await?;
    println!("cache read: {value:?}");
    println!("fast tier after promotion: {:?}", fast.get(&"visits".to_string()).await?);

    Ok(())
}
