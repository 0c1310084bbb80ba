//! Application state shared by every request handler.
//!
//! The backend combination is chosen by feature flags; each combination gets
//! its own `AppState::new` factory below.

use std::sync::Arc;

use notifyd_core::cache::{Cache, CachePubSub, ListCache};
use notifyd_core::storage::NotificationRepository;

use crate::cache::{NotificationCache, NotificationEventPublisher, RecentNotificationCache};
use crate::config::Config;
use crate::service::NotificationService;

#[derive(Clone)]
pub struct AppState {
    pub notifications: Arc<NotificationService>,
}

impl AppState {
    /// Wires a repository and a cache backend into the notification service.
    ///
    /// The same backend serves the entity cache and the recent list.
    fn build<C, P>(
        repository: Arc<dyn NotificationRepository>,
        cache: Arc<C>,
        pubsub: Arc<P>,
        config: &Config,
    ) -> Self
    where
        C: Cache + ListCache + 'static,
        P: CachePubSub + 'static,
    {
        let entity_cache = Arc::new(NotificationCache::new(
            cache.clone(),
            config.notification_cache_ttl(),
        ));
        let recent_cache = Arc::new(RecentNotificationCache::new(
            cache,
            config.recent_cache_capacity,
            config.recent_cache_ttl(),
        ));
        let publisher = Arc::new(NotificationEventPublisher::new(pubsub));

        let service = NotificationService::new(
            repository,
            entity_cache,
            recent_cache,
            publisher,
            config.recent_cache_capacity,
        );

        Self {
            notifications: Arc::new(service),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::memory::{MemoryCache, MemoryPubSub};
    use crate::storage::inmemory::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Needs no external services.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let pubsub = Arc::new(MemoryPubSub::new());

            Ok(Self::build(repository, cache, pubsub, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::redis_impl::{RedisCache, RedisPubSub};
    use crate::storage::inmemory::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            let pubsub = Arc::new(RedisPubSub::new(&config.redis_url).await?);

            Ok(Self::build(repository, cache, pubsub, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::memory::{MemoryCache, MemoryPubSub};
    use crate::storage::sqlite::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            let pubsub = Arc::new(MemoryPubSub::new());

            Ok(Self::build(repository, cache, pubsub, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::redis_impl::{RedisCache, RedisPubSub};
    use crate::storage::sqlite::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            let pubsub = Arc::new(RedisPubSub::new(&config.redis_url).await?);

            Ok(Self::build(repository, cache, pubsub, config))
        }
    }
}
