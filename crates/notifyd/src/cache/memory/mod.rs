//! In-memory cache backend implementation.
//!
//! Thread-safe key/value and list cache with TTL support plus broadcast
//! pub/sub, for single-instance deployments and tests.

mod cache;
mod pubsub;

pub use cache::MemoryCache;
pub use pubsub::MemoryPubSub;
