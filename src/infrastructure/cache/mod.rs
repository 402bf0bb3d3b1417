//! Caching layer for fast routing-config lookups.
//!
//! Provides a [`RouteCache`] trait with two implementations:
//! - [`RedisRouteCache`] - Production Redis-backed key-value cache
//! - [`NullRouteCache`] - No-op implementation for disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullRouteCache;
pub use redis_cache::RedisRouteCache;
pub use service::{CacheError, CacheResult, RouteCache};

#[cfg(test)]
pub use service::MockRouteCache;
