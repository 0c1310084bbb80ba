mod error;
mod health;
mod notifications;

pub use error::{AppError, BadRequest, ErrorResponse};
pub use health::livez;
pub use notifications::{
    create_notification, delete_notification, get_notification, recent_notifications,
    update_notification,
};
