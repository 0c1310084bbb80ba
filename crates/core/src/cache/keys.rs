use std::time::Duration;

/// List key holding the recent notification summaries.
pub const RECENT_NOTIFICATIONS_KEY: &str = "notifications:recent";

/// Channel that receives "notification created" events.
pub const NOTIFICATION_CREATED_CHANNEL: &str = "notifications:created";

/// Maximum number of summaries kept in the recent list.
pub const RECENT_NOTIFICATIONS_MAX: usize = 10;

/// Lifetime of the recent list after its last write.
pub const RECENT_NOTIFICATIONS_TTL: Duration = Duration::from_secs(600);

/// Returns the cache key for a single notification.
pub fn notification_key(id: i64) -> String {
    format!("notification:{}", id)
}
