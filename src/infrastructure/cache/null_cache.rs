//! No-op route cache for disabled caching.

use super::service::{CacheResult, RouteCache};
use crate::domain::entities::RoutingConfig;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup
/// misses, so each request reads the link store.
pub struct NullRouteCache;

impl NullRouteCache {
    /// Creates a new NullRouteCache instance.
    pub fn new() -> Self {
        debug!("Using NullRouteCache (caching disabled)");
        Self
    }
}

impl Default for NullRouteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouteCache for NullRouteCache {
    async fn get_route(&self, _id: &str) -> CacheResult<Option<RoutingConfig>> {
        Ok(None)
    }

    async fn set_route(
        &self,
        _id: &str,
        _config: &RoutingConfig,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
