mod notifications;

pub use notifications::NotificationService;
