//! Link resolution: identifier to routing config.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::RoutingConfig;
use crate::domain::repositories::{RouteRepository, StoreError};
use crate::domain::tasks::BackgroundTasks;
use crate::infrastructure::cache::RouteCache;

/// Why a resolve produced no routing config.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no routing config for this identifier")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves link identifiers with a cache-aside read.
///
/// 1. Look the identifier up in the route cache
/// 2. On miss, read the link store
/// 3. On store hit, write the config back to the cache in the background
///
/// Cache failures are never fatal; only the store decides "not found".
pub struct RouteService {
    repository: Arc<dyn RouteRepository>,
    cache: Arc<dyn RouteCache>,
    tasks: Arc<dyn BackgroundTasks>,
}

impl RouteService {
    pub fn new(
        repository: Arc<dyn RouteRepository>,
        cache: Arc<dyn RouteCache>,
        tasks: Arc<dyn BackgroundTasks>,
    ) -> Self {
        Self {
            repository,
            cache,
            tasks,
        }
    }

    /// Resolves an identifier, taken verbatim from the request path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when no record exists and
    /// [`ResolveError::Store`] on backend failures or malformed records.
    pub async fn resolve(&self, id: &str) -> Result<RoutingConfig, ResolveError> {
        match self.cache.get_route(id).await {
            Ok(Some(config)) => return Ok(config),
            Ok(None) => {}
            Err(e) => warn!(link_id = %id, error = %e, "Route cache read failed, falling back to store"),
        }

        let config = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ResolveError::NotFound)?;

        self.write_back(id, &config);

        Ok(config)
    }

    fn write_back(&self, id: &str, config: &RoutingConfig) {
        let cache = Arc::clone(&self.cache);
        let id = id.to_string();
        let config = config.clone();

        self.tasks.submit(Box::pin(async move {
            match cache.set_route(&id, &config, None).await {
                Ok(()) => debug!(link_id = %id, "Route cached"),
                Err(e) => warn!(link_id = %id, error = %e, "Failed to cache route"),
            }
        }));
    }

    /// Reports `(store_ok, cache_ok)`.
    pub async fn health(&self) -> (bool, bool) {
        tokio::join!(self.repository.health_check(), self.cache.health_check())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRouteRepository;
    use crate::domain::tasks::testing::DeferredTasks;
    use crate::infrastructure::cache::{CacheError, MockRouteCache};

    fn config() -> RoutingConfig {
        RoutingConfig::new("abc", "acct_1", "https://a.example")
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let mut repo = MockRouteRepository::new();
        let mut cache = MockRouteCache::new();

        cache
            .expect_get_route()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(Some(config())));
        cache.expect_set_route().times(0);
        repo.expect_find_by_id().times(0);

        let tasks = Arc::new(DeferredTasks::default());
        let service = RouteService::new(Arc::new(repo), Arc::new(cache), tasks.clone());

        let resolved = service.resolve("abc").await.unwrap();

        assert_eq!(resolved, config());
        assert_eq!(tasks.len(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_and_writes_back() {
        let mut repo = MockRouteRepository::new();
        let mut cache = MockRouteCache::new();

        cache.expect_get_route().times(1).returning(|_| Ok(None));
        repo.expect_find_by_id()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(Some(config())));
        cache
            .expect_set_route()
            .withf(|id, cfg, ttl| id == "abc" && cfg.account_id == "acct_1" && ttl.is_none())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let tasks = Arc::new(DeferredTasks::default());
        let service = RouteService::new(Arc::new(repo), Arc::new(cache), tasks.clone());

        let resolved = service.resolve("abc").await.unwrap();
        assert_eq!(resolved.default_url(), "https://a.example");

        assert_eq!(tasks.len(), 1);
        tasks.run_all().await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut repo = MockRouteRepository::new();
        let mut cache = MockRouteCache::new();

        cache.expect_get_route().returning(|_| Ok(None));
        cache.expect_set_route().times(0);
        repo.expect_find_by_id().returning(|_| Ok(None));

        let tasks = Arc::new(DeferredTasks::default());
        let service = RouteService::new(Arc::new(repo), Arc::new(cache), tasks.clone());

        let result = service.resolve("missing").await;

        assert!(matches!(result, Err(ResolveError::NotFound)));
        assert_eq!(tasks.len(), 0);
    }

    #[tokio::test]
    async fn test_store_error_is_distinct_from_not_found() {
        let mut repo = MockRouteRepository::new();
        let mut cache = MockRouteCache::new();

        cache.expect_get_route().returning(|_| Ok(None));
        repo.expect_find_by_id()
            .returning(|_| Err(StoreError::Backend("connection refused".to_string())));

        let service = RouteService::new(
            Arc::new(repo),
            Arc::new(cache),
            Arc::new(DeferredTasks::default()),
        );

        let result = service.resolve("abc").await;

        assert!(matches!(result, Err(ResolveError::Store(StoreError::Backend(_)))));
    }

    #[tokio::test]
    async fn test_cache_error_falls_back_to_store() {
        let mut repo = MockRouteRepository::new();
        let mut cache = MockRouteCache::new();

        cache
            .expect_get_route()
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        cache.expect_set_route().returning(|_, _, _| Ok(()));
        repo.expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(config())));

        let service = RouteService::new(
            Arc::new(repo),
            Arc::new(cache),
            Arc::new(DeferredTasks::default()),
        );

        assert!(service.resolve("abc").await.is_ok());
    }
}
