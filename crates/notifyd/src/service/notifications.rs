//! Notification lifecycle orchestration.
//!
//! The store is always written first and decides the outcome. Cache and
//! publish calls follow and can only degrade, never fail, an operation.

use std::sync::Arc;

use chrono::Utc;

use notifyd_core::cache::{EntityCache, NotificationPublisher, RecentCache};
use notifyd_core::notification::{
    to_summaries, NewNotification, Notification, RecentNotification, ServiceError, ServiceResult,
    UpdateNotificationRequest,
};
use notifyd_core::storage::NotificationRepository;

/// Composes the store, both caches and the event publisher.
#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
    entity_cache: Arc<dyn EntityCache>,
    recent_cache: Arc<dyn RecentCache>,
    publisher: Arc<dyn NotificationPublisher>,
    recent_limit: usize,
}

impl NotificationService {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        entity_cache: Arc<dyn EntityCache>,
        recent_cache: Arc<dyn RecentCache>,
        publisher: Arc<dyn NotificationPublisher>,
        recent_limit: usize,
    ) -> Self {
        Self {
            repository,
            entity_cache,
            recent_cache,
            publisher,
            recent_limit,
        }
    }

    /// Persists a notification, records it as recent and announces it.
    ///
    /// The entity cache is not populated here; the first read fills it.
    pub async fn create(&self, notification: NewNotification) -> ServiceResult<Notification> {
        let saved = self.repository.save(&notification).await.map_err(|err| {
            tracing::error!(error = %err, "Failed to save notification");
            ServiceError::from(err)
        })?;

        tracing::info!(notification_id = saved.id, kind = %saved.kind, "Notification created");

        self.recent_cache.add(&saved.summary()).await;
        self.publisher.publish(&saved).await;

        Ok(saved)
    }

    /// Reads a notification through the entity cache.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Notification> {
        if let Some(cached) = self.entity_cache.get(id).await {
            return Ok(cached);
        }

        let notification = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| {
                tracing::error!(notification_id = id, error = %err, "Failed to load notification");
                ServiceError::from(err)
            })?
            .ok_or(ServiceError::NotFound(id))?;

        self.entity_cache.put(id, &notification).await;
        Ok(notification)
    }

    /// Returns the most recent notification summaries, newest first.
    ///
    /// Serves the recent cache when it has entries. Otherwise loads from the
    /// store and repopulates the cache. Never fails: a store error yields an
    /// empty list.
    pub async fn get_recent(&self) -> Vec<RecentNotification> {
        let cached = self.recent_cache.snapshot().await;
        if !cached.is_empty() {
            tracing::trace!(count = cached.len(), "Recent notifications served from cache");
            return cached;
        }

        let notifications = match self.repository.find_most_recent(self.recent_limit).await {
            Ok(notifications) => notifications,
            Err(err) => {
                tracing::error!(error = %err, "Failed to load recent notifications");
                return Vec::new();
            }
        };

        let summaries = to_summaries(&notifications);
        tracing::debug!(count = summaries.len(), "Repopulating recent notifications cache");

        // Pushing to the front reverses order, so add the oldest first
        for summary in summaries.iter().rev() {
            self.recent_cache.add(summary).await;
        }

        summaries
    }

    /// Applies the non-blank fields of `request` and refreshes both caches.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateNotificationRequest,
    ) -> ServiceResult<Notification> {
        let mut notification = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| {
                tracing::error!(notification_id = id, error = %err, "Failed to load notification");
                ServiceError::from(err)
            })?
            .ok_or(ServiceError::NotFound(id))?;

        request.apply_to(&mut notification);
        notification.updated_at = Utc::now();

        let updated = self.repository.update(&notification).await.map_err(|err| {
            tracing::error!(notification_id = id, error = %err, "Failed to update notification");
            ServiceError::from(err)
        })?;

        tracing::info!(notification_id = id, "Notification updated");

        self.entity_cache.put(id, &updated).await;
        self.recent_cache.update(&updated.summary()).await;

        Ok(updated)
    }

    /// Deletes a notification and drops it from both caches.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let exists = self.repository.exists_by_id(id).await.map_err(|err| {
            tracing::error!(notification_id = id, error = %err, "Failed to check notification");
            ServiceError::from(err)
        })?;
        if !exists {
            return Err(ServiceError::NotFound(id));
        }

        self.repository.delete_by_id(id).await.map_err(|err| {
            tracing::error!(notification_id = id, error = %err, "Failed to delete notification");
            ServiceError::from(err)
        })?;

        tracing::info!(notification_id = id, "Notification deleted");

        self.entity_cache.evict(id).await;
        self.recent_cache.remove(id).await;

        Ok(())
    }
}
