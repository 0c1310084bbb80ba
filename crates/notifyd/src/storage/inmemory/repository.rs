//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use notifyd_core::notification::{sort_most_recent_first, NewNotification, Notification};
use notifyd_core::storage::{NotificationRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access. Ids come
/// from a monotonic counter and are never handed out twice.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    notifications: Arc<RwLock<HashMap<i64, Notification>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryRepository {
    async fn save(&self, notification: &NewNotification) -> Result<Notification> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let saved = notification.clone().with_id(id);

        let mut notifications = self.notifications.write().await;
        notifications.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.get(&id).cloned())
    }

    async fn find_most_recent(&self, limit: usize) -> Result<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        let mut all: Vec<Notification> = notifications.values().cloned().collect();
        sort_most_recent_first(&mut all);
        all.truncate(limit);
        Ok(all)
    }

    async fn update(&self, notification: &Notification) -> Result<Notification> {
        let mut notifications = self.notifications.write().await;
        match notifications.get_mut(&notification.id) {
            Some(stored) => {
                *stored = notification.clone();
                Ok(notification.clone())
            }
            None => Err(RepositoryError::NotFound(notification.id)),
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let notifications = self.notifications.read().await;
        Ok(notifications.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut notifications = self.notifications.write().await;
        notifications.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use notifyd_core::notification::NotificationType;

    fn new_notification(minutes: i64) -> NewNotification {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NewNotification::new(NotificationType::Email, "a@b.com", "C")
            .with_timestamps(base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.save(&new_notification(0)).await.unwrap();
        let second = repo.save(&new_notification(1)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryRepository::new();
        let saved = repo.save(&new_notification(0)).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), Some(saved));
        assert_eq!(repo.find_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let first = repo.save(&new_notification(0)).await.unwrap();
        repo.delete_by_id(first.id).await.unwrap();

        let second = repo.save(&new_notification(1)).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_most_recent_orders_and_limits() {
        let repo = InMemoryRepository::new();
        for minutes in [5, 1, 9, 3] {
            repo.save(&new_notification(minutes)).await.unwrap();
        }

        let recent = repo.find_most_recent(3).await.unwrap();

        let ids: Vec<i64> = recent.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 4]);
    }

    #[tokio::test]
    async fn test_find_most_recent_on_empty_store() {
        let repo = InMemoryRepository::new();
        assert!(repo.find_most_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryRepository::new();
        let mut saved = repo.save(&new_notification(0)).await.unwrap();
        saved.content = "changed".to_string();

        repo.update(&saved).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.content, "changed");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryRepository::new();
        let ghost = new_notification(0).with_id(77);

        let result = repo.update(&ghost).await;

        assert_eq!(result, Err(RepositoryError::NotFound(77)));
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let repo = InMemoryRepository::new();
        let saved = repo.save(&new_notification(0)).await.unwrap();

        assert!(repo.exists_by_id(saved.id).await.unwrap());
        repo.delete_by_id(saved.id).await.unwrap();
        assert!(!repo.exists_by_id(saved.id).await.unwrap());

        // Deleting again is fine
        repo.delete_by_id(saved.id).await.unwrap();
    }
}
