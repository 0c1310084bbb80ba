mod error;
mod keys;
mod ranges;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    notification_key, NOTIFICATION_CREATED_CHANNEL, RECENT_NOTIFICATIONS_KEY,
    RECENT_NOTIFICATIONS_MAX, RECENT_NOTIFICATIONS_TTL,
};
pub use ranges::{resolve_range, slice_range};
pub use serialization::{
    deserialize_notification, deserialize_summary, serialize_notification, serialize_summary,
    SerializationError,
};
pub use traits::{Cache, CachePubSub, EntityCache, ListCache, NotificationPublisher, RecentCache};
