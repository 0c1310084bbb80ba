//! Test doubles for cache backends.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use notifyd_core::cache::{Cache, CacheError, CachePubSub, ListCache, Result};

/// Backend whose every call fails as if the server were down.
pub struct FailingCache;

fn unavailable<T>() -> Result<T> {
    Err(CacheError::ConnectionFailed("cache unavailable".to_string()))
}

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        unavailable()
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> Result<()> {
        unavailable()
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        unavailable()
    }
}

#[async_trait]
impl ListCache for FailingCache {
    async fn push_front(&self, _key: &str, _value: &[u8]) -> Result<()> {
        unavailable()
    }

    async fn trim(&self, _key: &str, _start: isize, _stop: isize) -> Result<()> {
        unavailable()
    }

    async fn range(&self, _key: &str, _start: isize, _stop: isize) -> Result<Vec<Vec<u8>>> {
        unavailable()
    }

    async fn remove_value(&self, _key: &str, _count: usize, _value: &[u8]) -> Result<usize> {
        unavailable()
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<()> {
        unavailable()
    }
}

#[async_trait]
impl CachePubSub for FailingCache {
    async fn publish(&self, _channel: &str, _payload: &[u8]) -> Result<()> {
        Err(CacheError::PublishFailed("broker rejected message".to_string()))
    }

    async fn subscribe(&self, _channel: &str) -> Result<broadcast::Receiver<Vec<u8>>> {
        unavailable()
    }
}
