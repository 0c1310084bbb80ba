//! "Notification created" event publisher.

use std::sync::Arc;

use async_trait::async_trait;

use notifyd_core::cache::{
    serialize_notification, CachePubSub, NotificationPublisher, NOTIFICATION_CREATED_CHANNEL,
};
use notifyd_core::notification::Notification;

/// [`NotificationPublisher`] over any [`CachePubSub`] backend.
///
/// Sends the full record as JSON, once. Failures are logged and dropped.
pub struct NotificationEventPublisher<P: CachePubSub> {
    pubsub: Arc<P>,
    channel: String,
}

impl<P: CachePubSub> NotificationEventPublisher<P> {
    /// Creates a publisher for the `notifications:created` channel.
    pub fn new(pubsub: Arc<P>) -> Self {
        Self::with_channel(pubsub, NOTIFICATION_CREATED_CHANNEL)
    }

    pub fn with_channel(pubsub: Arc<P>, channel: impl Into<String>) -> Self {
        Self {
            pubsub,
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl<P: CachePubSub + 'static> NotificationPublisher for NotificationEventPublisher<P> {
    async fn publish(&self, notification: &Notification) {
        let payload = match serialize_notification(notification) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(notification_id = notification.id, error = %err, "Failed to serialize notification event");
                return;
            }
        };

        match self.pubsub.publish(&self.channel, &payload).await {
            Ok(()) => tracing::info!(
                notification_id = notification.id,
                channel = %self.channel,
                "Published notification created event"
            ),
            Err(err) => tracing::error!(
                notification_id = notification.id,
                channel = %self.channel,
                error = %err,
                "Failed to publish notification created event"
            ),
        }
    }
}
