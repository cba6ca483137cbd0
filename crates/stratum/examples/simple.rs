// Copyright (c) The Stratum Project Authors.
// Licensed under the MIT License.

//! Basic set/get against a single in-process tier.

use std::error::Error;
use std::time::Duration;

use stratum::{CacheService, InMemoryCache, TierConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cache = CacheService::builder()
        .tier(TierConfig::memory(
            InMemoryCache::<String, String>::builder().default_ttl(Duration::from_secs(300)),
        ))
        .build()?;

    cache.set(&"greeting".to_string(), "hello".to_string()).await?;

    let value = cache.get(&"greeting".to_string()).await?;
    println!("greeting = {value:?}");

    let missing = cache.get(&"absent".to_string()).await?;
    println!("absent = {missing:?}");

    Ok(())
}
