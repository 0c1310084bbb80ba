//! Redis cache implementation.
//!
//! Plain values map to `GET`/`SET`/`DEL` and the list capability maps
//! one-to-one onto `LPUSH`/`LTRIM`/`LRANGE`/`LREM`/`EXPIRE`.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use notifyd_core::cache::{Cache, ListCache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

/// Redis TTLs have one-second resolution and zero means "expire now".
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => conn
                .set_ex::<_, _, ()>(key, value, ttl_seconds(duration))
                .await
                .map_err(map_redis_error),
            None => conn
                .set::<_, _, ()>(key, value)
                .await
                .map_err(map_redis_error),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)
    }
}

#[async_trait]
impl ListCache for RedisCache {
    async fn push_front(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.ltrim::<_, ()>(key, start, stop)
            .await
            .map_err(map_redis_error)
    }

    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.lrange(key, start, stop).await.map_err(map_redis_error)
    }

    async fn remove_value(&self, key: &str, count: usize, value: &[u8]) -> Result<usize> {
        let mut conn = self.conn.clone();
        // LREM treats a count of zero as "remove all"
        if count == 0 {
            return Ok(0);
        }
        let count = isize::try_from(count).unwrap_or(isize::MAX);
        conn.lrem(key, count, value).await.map_err(map_redis_error)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX);
        conn.expire::<_, ()>(key, seconds)
            .await
            .map_err(map_redis_error)
    }
}
