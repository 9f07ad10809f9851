use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with image cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),
}

/// Place image URL cache
///
/// L1 is an in-memory moka cache local to this instance. L2 is an optional
/// Redis tier shared across instances; without it the cache is purely
/// in-process.
pub struct ImageCache {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, String>,
    ttl_secs: u64,
}

impl ImageCache {
    /// In-process cache only
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            redis: None,
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
        }
    }

    /// Cache with a Redis tier behind the in-memory one
    pub async fn with_redis(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
        })
    }

    pub fn is_shared(&self) -> bool {
        self.redis.is_some()
    }

    /// Look up an image URL (L1 first, then L2)
    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(url) = self.l1_cache.get(key).await {
            tracing::trace!("L1 image cache hit: {}", key);
            return Ok(Some(url));
        }

        let Some(redis) = &self.redis else {
            tracing::trace!("Image cache miss: {}", key);
            return Ok(None);
        };

        let mut conn = redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(ImageKey::redis(key))
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match value {
            Some(url) => {
                tracing::trace!("L2 image cache hit: {}", key);
                self.l1_cache.insert(key.to_string(), url.clone()).await;
                Ok(Some(url))
            }
            None => {
                tracing::trace!("Image cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Store an image URL in both tiers
    pub async fn put(&self, key: &str, url: &str) -> Result<(), CacheError> {
        self.l1_cache.insert(key.to_string(), url.to_string()).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let _: () = redis::cmd("SETEX")
                .arg(ImageKey::redis(key))
                .arg(self.ttl_secs)
                .arg(url)
                .query_async(&mut *conn)
                .await?;
        }

        tracing::debug!("Cached image for {}", key);
        Ok(())
    }

    /// Remove an entry from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let _: () = redis::cmd("DEL")
                .arg(ImageKey::redis(key))
                .query_async(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            shared: self.is_shared(),
        }
    }
}

fn build_l1(l1_size: u64, ttl_secs: u64) -> moka::future::Cache<String, String> {
    moka::future::CacheBuilder::new(l1_size)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub shared: bool,
}

/// Image cache key builder
pub struct ImageKey;

impl ImageKey {
    /// Lowercase `"name|region"`, or `"name"` when no region is given
    pub fn place(name: &str, region: Option<&str>) -> String {
        let name = name.trim().to_lowercase();
        match region.map(str::trim).filter(|r| !r.is_empty()) {
            Some(region) => format!("{}|{}", name, region.to_lowercase()),
            None => name,
        }
    }

    /// Namespaced key used in Redis
    pub fn redis(key: &str) -> String {
        format!("image:{}", key)
    }
}
