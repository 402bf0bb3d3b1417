//! In-memory route repository, optionally seeded from a JSON file.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use validator::Validate;

use crate::domain::entities::RoutingConfig;
use crate::domain::repositories::{RouteRepository, StoreError};

/// Immutable map of routing configs.
///
/// Backs local runs (`ROUTE_STORE=file`) and tests. The map never changes
/// after construction, so lookups need no locking.
#[derive(Debug, Default)]
pub struct MemoryRouteRepository {
    routes: HashMap<String, RoutingConfig>,
}

impl MemoryRouteRepository {
    /// Builds a repository from configs, keyed by their `link_id`.
    ///
    /// Later entries win on duplicate ids.
    pub fn new(configs: impl IntoIterator<Item = RoutingConfig>) -> Self {
        let routes = configs
            .into_iter()
            .map(|config| (config.link_id.clone(), config))
            .collect();
        Self { routes }
    }

    /// Loads a JSON array of routing configs from disk.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not a JSON array of routing
    /// configs, or any record breaks the routing-config invariants.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read routes file {}", path.display()))?;

        let configs: Vec<RoutingConfig> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse routes file {}", path.display()))?;

        for config in &configs {
            config
                .validate()
                .with_context(|| format!("Invalid route '{}' in {}", config.link_id, path.display()))?;
        }

        Ok(Self::new(configs))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[async_trait]
impl RouteRepository for MemoryRouteRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<RoutingConfig>, StoreError> {
        Ok(self.routes.get(id).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
