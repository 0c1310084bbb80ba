//! SQLite repository implementation.
//!
//! Implements `NotificationRepository` from `notifyd_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use notifyd_core::notification::{NewNotification, Notification};
use notifyd_core::storage::{NotificationRepository, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_notification};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl NotificationRepository for SqliteRepository {
    async fn save(&self, notification: &NewNotification) -> Result<Notification> {
        let kind = notification.kind.as_str();
        let recipient = notification.recipient.clone();
        let subject = notification.subject.clone();
        let content = notification.content.clone();
        let created_at = format_datetime(&notification.created_at);
        let updated_at = format_datetime(&notification.updated_at);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_NOTIFICATION,
                    rusqlite::params![kind, recipient, subject, content, created_at, updated_at],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(notification.clone().with_id(id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_NOTIFICATION_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_notification) {
                    Ok(notification) => Ok(Some(notification)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn find_most_recent(&self, limit: usize) -> Result<Vec<Notification>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_MOST_RECENT_NOTIFICATIONS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([limit], row_to_notification)
                    .map_err(wrap_err)?;

                let mut notifications = Vec::new();
                for row_result in rows {
                    notifications.push(row_result.map_err(wrap_err)?);
                }
                Ok(notifications)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn update(&self, notification: &Notification) -> Result<Notification> {
        let id = notification.id;
        let kind = notification.kind.as_str();
        let recipient = notification.recipient.clone();
        let subject = notification.subject.clone();
        let content = notification.content.clone();
        let updated_at = format_datetime(&notification.updated_at);

        self.conn
            .call(move |conn| {
                let rows_affected = conn
                    .execute(
                        schema::UPDATE_NOTIFICATION,
                        rusqlite::params![id, kind, recipient, subject, content, updated_at],
                    )
                    .map_err(wrap_err)?;
                if rows_affected == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))?;

        Ok(notification.clone())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::EXISTS_NOTIFICATION, [id], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_NOTIFICATION, [id])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use notifyd_core::notification::NotificationType;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory()
            .await
            .expect("in-memory database")
    }

    fn new_notification(minutes: i64) -> NewNotification {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NewNotification::new(NotificationType::Sms, "+15550100", "Body")
            .with_subject("Subject")
            .with_timestamps(base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = repo().await;

        let saved = repo.save(&new_notification(0)).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap();

        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = repo().await;
        assert_eq!(repo.find_by_id(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_timestamps_survive_roundtrip() {
        let repo = repo().await;
        let new = NewNotification::new(NotificationType::Email, "a@b.com", "C");

        let saved = repo.save(&new).await.unwrap();
        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(found.created_at, new.created_at);
        assert_eq!(found.updated_at, new.updated_at);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = repo().await;
        let first = repo.save(&new_notification(0)).await.unwrap();
        let second = repo.save(&new_notification(1)).await.unwrap();
        repo.delete_by_id(second.id).await.unwrap();

        let third = repo.save(&new_notification(2)).await.unwrap();

        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_find_most_recent() {
        let repo = repo().await;
        for minutes in [5, 1, 9, 3] {
            repo.save(&new_notification(minutes)).await.unwrap();
        }

        let recent = repo.find_most_recent(3).await.unwrap();

        let ids: Vec<i64> = recent.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 4]);
    }

    #[tokio::test]
    async fn test_find_most_recent_breaks_ties_by_id() {
        let repo = repo().await;
        let a = repo.save(&new_notification(0)).await.unwrap();
        let b = repo.save(&new_notification(0)).await.unwrap();

        let recent = repo.find_most_recent(10).await.unwrap();

        assert_eq!(recent[0].id, b.id);
        assert_eq!(recent[1].id, a.id);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let mut saved = repo.save(&new_notification(0)).await.unwrap();
        saved.subject = None;
        saved.content = "changed".to_string();
        saved.updated_at = saved.updated_at + Duration::minutes(1);

        repo.update(&saved).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let ghost = new_notification(0).with_id(99);

        assert_eq!(
            repo.update(&ghost).await,
            Err(RepositoryError::NotFound(99))
        );
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let repo = repo().await;
        let saved = repo.save(&new_notification(0)).await.unwrap();

        assert!(repo.exists_by_id(saved.id).await.unwrap());
        repo.delete_by_id(saved.id).await.unwrap();
        assert!(!repo.exists_by_id(saved.id).await.unwrap());
        repo.delete_by_id(saved.id).await.unwrap();
    }
}
