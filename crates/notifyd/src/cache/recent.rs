//! Bounded recent-notifications list cache.
//!
//! The list lives under a single key and is built from list primitives:
//! add is `LPUSH` + `LTRIM 0 K-1` + `EXPIRE`, snapshot is `LRANGE 0 K-1`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use notifyd_core::cache::{
    deserialize_summary, serialize_summary, CacheError, ListCache, RecentCache,
    RECENT_NOTIFICATIONS_KEY,
};
use notifyd_core::notification::RecentNotification;

/// [`RecentCache`] over any [`ListCache`] backend.
///
/// Each mutation resets the lifetime of the whole list. Backend failures are
/// logged at warn and never returned.
pub struct RecentNotificationCache<L: ListCache> {
    list: Arc<L>,
    key: String,
    capacity: usize,
    ttl: Duration,
}

impl<L: ListCache> RecentNotificationCache<L> {
    /// Creates a cache holding at most `capacity` summaries (at least one).
    pub fn new(list: Arc<L>, capacity: usize, ttl: Duration) -> Self {
        Self {
            list,
            key: RECENT_NOTIFICATIONS_KEY.to_string(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Inclusive index of the last element kept.
    fn last_index(&self) -> isize {
        isize::try_from(self.capacity - 1).unwrap_or(isize::MAX)
    }

    async fn try_add(&self, summary: &RecentNotification) -> Result<(), CacheError> {
        let bytes = serialize_summary(summary)?;
        self.list.push_front(&self.key, &bytes).await?;
        self.list.trim(&self.key, 0, self.last_index()).await?;
        self.list.expire(&self.key, self.ttl).await
    }

    /// Removes the first matching entry. Returns whether one was found.
    async fn try_remove(&self, id: i64) -> Result<bool, CacheError> {
        let items = self.list.range(&self.key, 0, -1).await?;

        for bytes in items {
            match deserialize_summary(&bytes) {
                Ok(summary) if summary.id == id => {
                    self.list.remove_value(&self.key, 1, &bytes).await?;
                    self.list.expire(&self.key, self.ttl).await?;
                    return Ok(true);
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping unreadable recent notification entry");
                }
            }
        }

        Ok(false)
    }
}

#[async_trait]
impl<L: ListCache + 'static> RecentCache for RecentNotificationCache<L> {
    async fn add(&self, summary: &RecentNotification) {
        match self.try_add(summary).await {
            Ok(()) => {
                tracing::debug!(notification_id = summary.id, "Added notification to recent cache")
            }
            Err(err) => {
                tracing::warn!(notification_id = summary.id, error = %err, "Failed to add notification to recent cache")
            }
        }
    }

    async fn update(&self, summary: &RecentNotification) {
        self.remove(summary.id).await;
        self.add(summary).await;
    }

    async fn remove(&self, id: i64) {
        match self.try_remove(id).await {
            Ok(true) => tracing::debug!(notification_id = id, "Removed notification from recent cache"),
            Ok(false) => tracing::trace!(notification_id = id, "Notification not in recent cache"),
            Err(err) => {
                tracing::warn!(notification_id = id, error = %err, "Failed to remove notification from recent cache")
            }
        }
    }

    async fn snapshot(&self) -> Vec<RecentNotification> {
        let items = match self.list.range(&self.key, 0, self.last_index()).await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read recent notifications from cache");
                return Vec::new();
            }
        };

        items
            .iter()
            .filter_map(|bytes| match deserialize_summary(bytes) {
                Ok(summary) => Some(summary),
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping unreadable recent notification entry");
                    None
                }
            })
            .collect()
    }
}
