//! Cache backends and the notification cache adapters built on them.
//!
//! The backends implement the capability traits from `notifyd_core::cache`
//! and are selected at compile time:
//!
//! - `memory` (default): in-process cache using tokio synchronization primitives
//! - `redis`: shared Redis server
//!
//! These features are mutually exclusive. The adapters ([`NotificationCache`],
//! [`RecentNotificationCache`], [`NotificationEventPublisher`]) work with
//! either backend.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p notifyd --features memory"
);

mod entity;
mod publisher;
mod recent;

// Tests run against the memory backend whatever the feature selection
#[cfg(any(feature = "memory", test))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(test)]
pub mod testing;

pub use entity::NotificationCache;
pub use publisher::NotificationEventPublisher;
pub use recent::RecentNotificationCache;
