use async_trait::async_trait;

use crate::notification::{NewNotification, Notification};

use super::Result;

/// Durable store of notification records.
///
/// The store owns id assignment. Ids are never reused, even after deletion.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persists a new notification and returns it with its assigned id.
    async fn save(&self, notification: &NewNotification) -> Result<Notification>;

    /// Gets a notification by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>>;

    /// Returns up to `limit` notifications, newest first by creation time.
    /// Ties are broken by id, highest first.
    async fn find_most_recent(&self, limit: usize) -> Result<Vec<Notification>>;

    /// Overwrites an existing notification.
    ///
    /// Fails with [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// if the id does not exist.
    async fn update(&self, notification: &Notification) -> Result<Notification>;

    /// Checks whether a notification exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Deletes a notification. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}
