//! Redis pub/sub implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use tokio::sync::{broadcast, RwLock};

use notifyd_core::cache::{CacheError, CachePubSub, Result};

use super::error::map_redis_error;

type Subscriptions = Arc<RwLock<HashMap<String, broadcast::Sender<Vec<u8>>>>>;

/// Redis pub/sub backend.
///
/// One background task per subscribed channel forwards Redis messages into a
/// local broadcast channel shared by every local subscriber.
pub struct RedisPubSub {
    client: redis::Client,
    subscriptions: Subscriptions,
}

impl RedisPubSub {
    /// Creates a new Redis pub/sub connection.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;

        // Verify connection by getting a connection
        let _ = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        Ok(Self {
            client,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

#[async_trait]
impl CachePubSub for RedisPubSub {
    async fn publish(&self, channel: &str, payload: &[u8]) -> Result<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        conn.publish::<_, _, ()>(channel, payload)
            .await
            .map_err(|e| CacheError::PublishFailed(e.to_string()))?;

        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<broadcast::Receiver<Vec<u8>>> {
        {
            let subscriptions = self.subscriptions.read().await;
            if let Some(sender) = subscriptions.get(channel) {
                return Ok(sender.subscribe());
            }
        }

        let (tx, rx) = broadcast::channel(100);

        {
            let mut subscriptions = self.subscriptions.write().await;
            // Another task may have subscribed in the meantime
            if let Some(sender) = subscriptions.get(channel) {
                return Ok(sender.subscribe());
            }
            subscriptions.insert(channel.to_string(), tx.clone());
        }

        let channel = channel.to_string();
        let client = self.client.clone();
        let subscriptions = Arc::clone(&self.subscriptions);

        tokio::spawn(async move {
            if let Err(e) =
                run_subscription_loop(client, channel.clone(), tx, Arc::clone(&subscriptions))
                    .await
            {
                tracing::error!(channel = %channel, error = %e, "Redis subscription failed");
                subscriptions.write().await.remove(&channel);
            }
        });

        Ok(rx)
    }
}

/// Runs the Redis subscription loop, forwarding messages to the broadcast channel.
async fn run_subscription_loop(
    client: redis::Client,
    channel: String,
    tx: broadcast::Sender<Vec<u8>>,
    subscriptions: Subscriptions,
) -> Result<()> {
    let mut pubsub = client.get_async_pubsub().await.map_err(map_redis_error)?;

    pubsub.subscribe(&channel).await.map_err(map_redis_error)?;

    let mut stream = pubsub.on_message();

    while let Some(msg) = stream.next().await {
        match msg.get_payload::<Vec<u8>>() {
            Ok(payload) => {
                let _ = tx.send(payload);
            }
            Err(e) => {
                tracing::warn!(channel = %channel, error = %e, "Dropping unreadable pub/sub message");
            }
        }
    }

    tracing::info!(channel = %channel, "Redis subscription stream ended");
    subscriptions.write().await.remove(&channel);

    Ok(())
}
