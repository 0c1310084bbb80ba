use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::notification::{Notification, RecentNotification};

use super::Result;

/// Trait for basic key/value cache operations.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Trait for Redis-style list operations.
///
/// Indices follow `LRANGE`/`LTRIM` semantics: inclusive, negative values
/// count from the tail.
#[async_trait]
pub trait ListCache: Send + Sync {
    /// Pushes a value to the head of the list, creating it if needed.
    async fn push_front(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Keeps only the elements between `start` and `stop`.
    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()>;

    /// Returns the elements between `start` and `stop`.
    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// Removes up to `count` elements equal to `value`, scanning from the head.
    /// Returns how many were removed.
    async fn remove_value(&self, key: &str, count: usize, value: &[u8]) -> Result<usize>;

    /// Sets the time-to-live of the whole list.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<()>;
}

/// Trait for cache pub/sub operations.
#[async_trait]
pub trait CachePubSub: Send + Sync {
    /// Publishes a payload to a channel. Having no subscribers is not an error.
    async fn publish(&self, channel: &str, payload: &[u8]) -> Result<()>;

    /// Subscribes to a channel.
    async fn subscribe(&self, channel: &str) -> Result<broadcast::Receiver<Vec<u8>>>;
}

/// Point cache of full notification records keyed by id.
///
/// Implementations absorb backend failures: a failed read is a miss and a
/// failed write is a no-op.
#[async_trait]
pub trait EntityCache: Send + Sync {
    async fn get(&self, id: i64) -> Option<Notification>;

    async fn put(&self, id: i64, notification: &Notification);

    async fn evict(&self, id: i64);
}

/// Bounded, newest-first list of recent notification summaries.
///
/// Every mutation refreshes the lifetime of the whole list. Like
/// [`EntityCache`], failures never reach the caller.
#[async_trait]
pub trait RecentCache: Send + Sync {
    /// Adds a summary to the front and drops anything past capacity.
    async fn add(&self, summary: &RecentNotification);

    /// Replaces the entry for `summary.id` and moves it to the front.
    async fn update(&self, summary: &RecentNotification);

    /// Removes the first entry with the given id.
    async fn remove(&self, id: i64);

    /// Returns up to capacity summaries in list order.
    async fn snapshot(&self) -> Vec<RecentNotification>;
}

/// Best-effort emitter of "notification created" events.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, notification: &Notification);
}
