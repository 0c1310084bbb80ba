//! Point cache of full notification records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use notifyd_core::cache::{
    deserialize_notification, notification_key, serialize_notification, Cache, EntityCache,
};
use notifyd_core::notification::Notification;

/// [`EntityCache`] over any key/value [`Cache`] backend.
///
/// Records are stored as JSON under `notification:{id}`. Backend failures are
/// logged and turned into misses or no-ops.
pub struct NotificationCache<C: Cache> {
    cache: Arc<C>,
    ttl: Option<Duration>,
}

impl<C: Cache> NotificationCache<C> {
    /// Creates a new entity cache. `ttl` of `None` keeps entries until evicted.
    pub fn new(cache: Arc<C>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }
}

#[async_trait]
impl<C: Cache + 'static> EntityCache for NotificationCache<C> {
    async fn get(&self, id: i64) -> Option<Notification> {
        let bytes = match self.cache.get(&notification_key(id)).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::trace!(notification_id = id, "Cache miss for notification");
                return None;
            }
            Err(err) => {
                tracing::warn!(notification_id = id, error = %err, "Failed to read notification from cache");
                return None;
            }
        };

        match deserialize_notification(&bytes) {
            Ok(notification) => {
                tracing::trace!(notification_id = id, "Cache hit for notification");
                Some(notification)
            }
            Err(err) => {
                tracing::warn!(notification_id = id, error = %err, "Cached notification deserialization failed");
                None
            }
        }
    }

    async fn put(&self, id: i64, notification: &Notification) {
        let bytes = match serialize_notification(notification) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(notification_id = id, error = %err, "Failed to serialize notification for cache");
                return;
            }
        };

        if let Err(err) = self.cache.set(&notification_key(id), &bytes, self.ttl).await {
            tracing::warn!(notification_id = id, error = %err, "Failed to cache notification");
        }
    }

    async fn evict(&self, id: i64) {
        if let Err(err) = self.cache.delete(&notification_key(id)).await {
            tracing::warn!(notification_id = id, error = %err, "Failed to evict notification from cache");
        }
    }
}
