use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Email,
    Sms,
}

impl NotificationType {
    /// Returns the wire/storage representation of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Email => "EMAIL",
            NotificationType::Sms => "SMS",
        }
    }

    /// Parses the wire/storage representation of a type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EMAIL" => Some(NotificationType::Email),
            "SMS" => Some(NotificationType::Sms),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification that has not been persisted yet.
///
/// The store assigns the identifier when saving, turning this into a
/// [`Notification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationType,
    pub recipient: String,
    pub subject: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewNotification {
    /// Creates a new unsaved notification stamped with the current time.
    pub fn new(
        kind: NotificationType,
        recipient: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            kind,
            recipient: recipient.into(),
            subject: None,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets both timestamps (useful for testing).
    pub fn with_timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    /// Attaches a store-assigned identifier.
    pub fn with_id(self, id: i64) -> Notification {
        Notification {
            id,
            kind: self.kind,
            recipient: self.recipient,
            subject: self.subject,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A persisted notification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Returns the list projection of this notification.
    pub fn summary(&self) -> RecentNotification {
        RecentNotification::from(self)
    }
}

/// Projection of a [`Notification`] kept in the recent notifications list.
///
/// Carries no content to keep list entries small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentNotification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for RecentNotification {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            recipient: notification.recipient.clone(),
            subject: notification.subject.clone(),
            created_at: notification.created_at,
        }
    }
}
