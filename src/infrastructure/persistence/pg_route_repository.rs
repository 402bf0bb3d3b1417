//! PostgreSQL implementation of the route repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;
use validator::Validate;

use crate::domain::entities::{Destinations, RoutingConfig};
use crate::domain::repositories::{RouteRepository, StoreError};

/// PostgreSQL repository reading the `link_routes` table.
///
/// `destinations` is a JSONB column holding the same flat
/// `{"default": ..., "<CC>": ...}` object that the cache stores.
pub struct PgRouteRepository {
    pool: Arc<PgPool>,
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    link_id: String,
    account_id: String,
    destinations: Json<serde_json::Value>,
}

impl PgRouteRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFrom<RouteRow> for RoutingConfig {
    type Error = StoreError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        let malformed = |reason: String| StoreError::Malformed {
            id: row.link_id.clone(),
            reason,
        };

        let destinations: Destinations =
            serde_json::from_value(row.destinations.0.clone()).map_err(|e| malformed(e.to_string()))?;

        let config = RoutingConfig {
            link_id: row.link_id.clone(),
            account_id: row.account_id.clone(),
            destinations,
        };
        config.validate().map_err(|e| malformed(e.to_string()))?;

        Ok(config)
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<RoutingConfig>, StoreError> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT link_id, account_id, destinations
            FROM link_routes
            WHERE link_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        row.map(RoutingConfig::try_from).transpose()
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
