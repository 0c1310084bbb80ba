use std::{env, str::FromStr, time::Duration};

use notifyd_core::cache::{RECENT_NOTIFICATIONS_MAX, RECENT_NOTIFICATIONS_TTL};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL of cached notification records in seconds (default: none)
    pub notification_cache_ttl_seconds: Option<u64>,
    /// Lifetime of the recent notifications list in seconds (default: 600)
    pub recent_cache_ttl_seconds: u64,
    /// Number of summaries kept in the recent list (default and maximum: 10)
    pub recent_cache_capacity: usize,
    /// Maximum number of keys in the memory cache (default: 10,000)
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "notifyd.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NOTIFICATION_CACHE_TTL_SECONDS` - Entity cache TTL (default: unset)
    /// - `RECENT_CACHE_TTL_SECONDS` - Recent list lifetime (default: 600)
    /// - `RECENT_CACHE_CAPACITY` - Recent list size (default: 10, capped at 10)
    /// - `CACHE_MAX_ENTRIES` - Maximum memory cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "notifyd.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            notification_cache_ttl_seconds: parse_var(&lookup, "NOTIFICATION_CACHE_TTL_SECONDS")
                .filter(|secs: &u64| *secs > 0),
            recent_cache_ttl_seconds: parse_var(&lookup, "RECENT_CACHE_TTL_SECONDS")
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(RECENT_NOTIFICATIONS_TTL.as_secs()),
            recent_cache_capacity: parse_var(&lookup, "RECENT_CACHE_CAPACITY")
                .filter(|n: &usize| *n > 0)
                .map_or(RECENT_NOTIFICATIONS_MAX, |n| n.min(RECENT_NOTIFICATIONS_MAX)),
            cache_max_entries: parse_var(&lookup, "CACHE_MAX_ENTRIES")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(10_000),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "notifyd.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// Entity cache TTL as a Duration, if one is configured.
    pub fn notification_cache_ttl(&self) -> Option<Duration> {
        self.notification_cache_ttl_seconds.map(Duration::from_secs)
    }

    /// Recent list lifetime as a Duration.
    pub fn recent_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.recent_cache_ttl_seconds)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
