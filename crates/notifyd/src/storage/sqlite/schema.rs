//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as fixed-width RFC 3339 text so
//! lexical order matches chronological order.

/// SQL statement to create all tables.
///
/// `AUTOINCREMENT` keeps SQLite from reusing the id of a deleted row.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL CHECK (type IN ('EMAIL', 'SMS')),
    recipient TEXT NOT NULL,
    subject TEXT,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_notifications_created_at ON notifications(created_at);
"#;

pub const INSERT_NOTIFICATION: &str = r#"
INSERT INTO notifications (type, recipient, subject, content, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_NOTIFICATION_BY_ID: &str = r#"
SELECT id, type, recipient, subject, content, created_at, updated_at
FROM notifications
WHERE id = ?1
"#;

pub const SELECT_MOST_RECENT_NOTIFICATIONS: &str = r#"
SELECT id, type, recipient, subject, content, created_at, updated_at
FROM notifications
ORDER BY created_at DESC, id DESC
LIMIT ?1
"#;

pub const UPDATE_NOTIFICATION: &str = r#"
UPDATE notifications
SET type = ?2, recipient = ?3, subject = ?4, content = ?5, updated_at = ?6
WHERE id = ?1
"#;

pub const EXISTS_NOTIFICATION: &str = r#"
SELECT EXISTS(SELECT 1 FROM notifications WHERE id = ?1)
"#;

pub const DELETE_NOTIFICATION: &str = r#"
DELETE FROM notifications
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_never_reuses_ids() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS notifications"));
        assert!(CREATE_TABLES.contains("AUTOINCREMENT"));
    }

    #[test]
    fn test_most_recent_ordering() {
        assert!(SELECT_MOST_RECENT_NOTIFICATIONS.contains("ORDER BY created_at DESC, id DESC"));
        assert!(SELECT_MOST_RECENT_NOTIFICATIONS.contains("LIMIT ?1"));
    }
}
