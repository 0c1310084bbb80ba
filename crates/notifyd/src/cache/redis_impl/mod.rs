//! Redis cache backend implementation.
//!
//! Shared cache for multi-instance deployments: key/value, lists, TTL and
//! pub/sub on one server.

mod cache;
mod error;
mod pubsub;

pub use cache::RedisCache;
pub use error::map_redis_error;
pub use pubsub::RedisPubSub;
