//! Route cache trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::entities::RoutingConfig;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value view of routing configs in front of the link store.
///
/// Implementations must be thread-safe and fail open: a cache failure
/// degrades to a store read, never to an error response.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisRouteCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullRouteCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteCache: Send + Sync {
    /// Retrieves the routing config cached for an identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails; callers treat it as a miss.
    async fn get_route(&self, id: &str) -> CacheResult<Option<RoutingConfig>>;

    /// Stores a routing config with optional TTL.
    ///
    /// # Arguments
    ///
    /// - `id` - The link identifier key
    /// - `config` - The routing config to cache
    /// - `ttl_seconds` - Optional TTL in seconds (implementation default if None)
    async fn set_route(
        &self,
        id: &str,
        config: &RoutingConfig,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
