use std::time::Duration;

use moka::future::Cache;

use super::{location::Location, provider::Provider};
use crate::config::LookupConfig;

/// Successful provider answers, keyed by `provider:target`.
#[derive(Clone)]
pub struct LocationCache {
    inner: Cache<String, Location>,
}

impl LocationCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let inner = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(capacity)
            .build();
        Self { inner }
    }

    /// `None` when caching is switched off.
    pub fn from_config(config: &LookupConfig) -> Option<Self> {
        config.cache.then(|| {
            Self::new(
                Duration::from_secs(config.cache_ttl_secs),
                config.cache_capacity,
            )
        })
    }

    fn key(provider: Provider, target: &str) -> String {
        format!("{}:{}", provider, target)
    }

    pub async fn get(&self, provider: Provider, target: &str) -> Option<Location> {
        self.inner.get(&Self::key(provider, target)).await
    }

    pub async fn insert(&self, provider: Provider, target: &str, location: Location) {
        self.inner
            .insert(Self::key(provider, target), location)
            .await;
    }
}
