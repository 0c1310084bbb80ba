mod error;
mod operations;
mod requests;
mod types;

pub use error::{ServiceError, ServiceResult, ValidationError, ValidationErrors};
pub use operations::{char_len, is_blank, patch_text, sort_most_recent_first, to_summaries};
pub use requests::{
    CreateNotificationRequest, UpdateNotificationRequest, MAX_CONTENT_LEN, MAX_RECIPIENT_LEN,
    MAX_SUBJECT_LEN,
};
pub use types::{NewNotification, Notification, NotificationType, RecentNotification};
