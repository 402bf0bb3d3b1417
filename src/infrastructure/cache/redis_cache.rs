//! Redis-backed route cache.

use super::service::{CacheError, CacheResult, RouteCache};
use crate::domain::entities::RoutingConfig;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache of routing configs, stored as JSON under `{prefix}{id}`.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Read errors
/// and undecodable entries are logged and reported as misses.
pub struct RedisRouteCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisRouteCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every identifier (may be empty)
    /// - `default_ttl_seconds` - TTL applied when [`RouteCache::set_route`] gets `None`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        key_prefix: &str,
        default_ttl_seconds: u64,
    ) -> CacheResult<Self> {
        info!("Connecting route cache to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Route cache connected to Redis");

        Ok(Self::from_manager(manager, key_prefix, default_ttl_seconds))
    }

    /// Wraps an existing connection manager.
    fn from_manager(manager: ConnectionManager, key_prefix: &str, default_ttl_seconds: u64) -> Self {
        Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: key_prefix.to_string(),
        }
    }

    fn build_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

#[async_trait]
impl RouteCache for RedisRouteCache {
    async fn get_route(&self, id: &str) -> CacheResult<Option<RoutingConfig>> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        let raw = match conn.get::<_, Option<String>>(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Redis GET error for {}: {}", id, e);
                return Ok(None);
            }
        };

        let Some(raw) = raw else {
            debug!("Cache MISS: {}", id);
            return Ok(None);
        };

        match RoutingConfig::from_json(&raw) {
            Ok(config) => {
                debug!("Cache HIT: {}", id);
                Ok(Some(config))
            }
            Err(reason) => {
                warn!(link_id = %id, %reason, "Ignoring undecodable cache entry");
                Ok(None)
            }
        }
    }

    async fn set_route(
        &self,
        id: &str,
        config: &RoutingConfig,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl_seconds.unwrap_or(self.default_ttl);

        let payload = serde_json::to_string(config)
            .map_err(|e| CacheError::OperationError(format!("Failed to encode route: {}", e)))?;

        match conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", id, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", id, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
