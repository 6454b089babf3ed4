//! Read cache backed by Redis.
//!
//! The cache holds derived, disposable JSON payloads keyed by cache key.
//! It is never authoritative: every operation is best-effort, failures are
//! logged at warn and degrade to a miss or a no-op, and writes elsewhere
//! invalidate keys explicitly rather than relying on expiry alone.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::warn;

/// Cache key for the dashboard analytics snapshot.
pub const ANALYTICS_DASHBOARD: &str = "analytics:dashboard";
/// Cache key for the admin-only full project listing.
pub const PROJECTS_ALL: &str = "projects:all";

/// Analytics snapshot lifetime (15 minutes).
pub const ANALYTICS_TTL_SECS: u64 = 900;
/// Project listing lifetime (1 hour).
pub const PROJECTS_TTL_SECS: u64 = 3600;

/// Shared Redis handle. When the initial connection fails the cache runs
/// disabled: every read is a miss and every write a no-op, so the API
/// keeps serving from the store alone.
#[derive(Clone)]
pub struct Cache {
    manager: Option<ConnectionManager>,
}

impl Cache {
    /// Connect to Redis. A failed connection is logged and yields a
    /// disabled cache rather than aborting startup.
    pub async fn connect(url: &str) -> Self {
        let manager = match Client::open(url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(manager) => Some(manager),
                Err(e) => {
                    warn!("Redis connection failed, running without cache: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Invalid Redis URL, running without cache: {}", e);
                None
            }
        };

        Cache { manager }
    }

    /// Cache handle with no backing connection (tests, cache-less runs).
    pub fn disabled() -> Self {
        Cache { manager: None }
    }

    /// Fetch a cached JSON payload. Any failure degrades to a miss.
    pub async fn get_json(&self, key: &str) -> Option<serde_json::Value> {
        let mut conn = self.manager.clone()?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                None
            }
        }
    }

    /// Store a JSON payload with a fixed expiry.
    pub async fn put_json(&self, key: &str, value: &serde_json::Value, ttl_secs: u64) {
        let Some(mut conn) = self.manager.clone() else {
            return;
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache serialization failed for '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = conn.set_ex::<_, _, ()>(key, raw, ttl_secs).await {
            warn!("Cache write failed for '{}': {}", key, e);
        }
    }

    /// Delete keys whose content a write may have changed. Invalidation is
    /// the writer's responsibility; a missed delete is bounded by TTL.
    pub async fn invalidate(&self, keys: &[&str]) {
        let Some(mut conn) = self.manager.clone() else {
            return;
        };
        for key in keys {
            if let Err(e) = conn.del::<_, ()>(*key).await {
                warn!("Cache invalidation failed for '{}': {}", key, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_names() {
        // Key names are part of the wire contract with operators inspecting Redis.
        assert_eq!(ANALYTICS_DASHBOARD, "analytics:dashboard");
        assert_eq!(PROJECTS_ALL, "projects:all");
    }

    #[tokio::test]
    async fn test_disabled_cache_misses_and_ignores_writes() {
        let cache = Cache::disabled();
        cache
            .put_json("k", &serde_json::json!({"a": 1}), 60)
            .await;
        assert!(cache.get_json("k").await.is_none());
        cache.invalidate(&["k"]).await;
    }
}
