//! API request types for notification operations.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.
//! Validation happens at the HTTP boundary before the service is called.

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrors};
use super::operations::{char_len, is_blank, patch_text};
use super::types::{NewNotification, Notification, NotificationType};

/// Maximum length of a recipient, in characters.
pub const MAX_RECIPIENT_LEN: usize = 255;
/// Maximum length of a subject, in characters.
pub const MAX_SUBJECT_LEN: usize = 255;
/// Maximum length of the content, in characters.
pub const MAX_CONTENT_LEN: usize = 5000;

/// Request payload for creating a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<NotificationType>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CreateNotificationRequest {
    /// Creates a request with all required fields.
    pub fn new(
        kind: NotificationType,
        recipient: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(kind),
            recipient: Some(recipient.into()),
            subject: None,
            content: Some(content.into()),
        }
    }

    /// Sets the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.kind.is_none() {
            errors.push(ValidationError::MissingType);
        }

        match self.recipient.as_deref() {
            None => errors.push(ValidationError::MissingRecipient),
            Some(r) if is_blank(r) => errors.push(ValidationError::MissingRecipient),
            Some(r) if char_len(r) > MAX_RECIPIENT_LEN => {
                errors.push(ValidationError::RecipientTooLong)
            }
            Some(_) => {}
        }

        if self
            .subject
            .as_deref()
            .is_some_and(|s| char_len(s) > MAX_SUBJECT_LEN)
        {
            errors.push(ValidationError::SubjectTooLong);
        }

        match self.content.as_deref() {
            None => errors.push(ValidationError::MissingContent),
            Some(c) if is_blank(c) => errors.push(ValidationError::MissingContent),
            Some(c) if char_len(c) > MAX_CONTENT_LEN => {
                errors.push(ValidationError::ContentTooLong)
            }
            Some(_) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Validates the request and converts it into an unsaved notification
    /// stamped with the current time.
    pub fn into_new_notification(self) -> Result<NewNotification, ValidationErrors> {
        self.validate()?;

        match (self.kind, self.recipient, self.content) {
            (Some(kind), Some(recipient), Some(content)) => {
                let mut new = NewNotification::new(kind, recipient, content);
                new.subject = self.subject;
                Ok(new)
            }
            // validate() has already rejected every other shape
            _ => Err(ValidationErrors(Vec::new())),
        }
    }
}

/// Request payload for updating a notification.
///
/// Absent or blank fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateNotificationRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Checks the length limits. Both fields are optional.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self
            .subject
            .as_deref()
            .is_some_and(|s| char_len(s) > MAX_SUBJECT_LEN)
        {
            errors.push(ValidationError::SubjectTooLong);
        }
        if self
            .content
            .as_deref()
            .is_some_and(|c| char_len(c) > MAX_CONTENT_LEN)
        {
            errors.push(ValidationError::ContentTooLong);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Applies the non-blank fields of this request to a notification.
    ///
    /// Type, recipient and timestamps are never touched.
    pub fn apply_to(&self, notification: &mut Notification) {
        if let Some(subject) = patch_text(self.subject.as_deref()) {
            notification.subject = Some(subject.to_string());
        }
        if let Some(content) = patch_text(self.content.as_deref()) {
            notification.content = content.to_string();
        }
    }
}
