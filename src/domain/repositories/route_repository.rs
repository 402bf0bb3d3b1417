//! Repository trait for routing configuration lookups.

use crate::domain::entities::RoutingConfig;
use async_trait::async_trait;

/// Errors from the link store, kept apart from "no such link".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or the query failed.
    #[error("route store backend error: {0}")]
    Backend(String),

    /// A record exists but does not decode into a valid [`RoutingConfig`].
    #[error("route record '{id}' is malformed: {reason}")]
    Malformed { id: String, reason: String },
}

/// Read-only access to routing records keyed by link identifier.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRouteRepository`] - PostgreSQL `link_routes` table
/// - [`crate::infrastructure::persistence::MemoryRouteRepository`] - In-memory map, optionally loaded from a JSON file
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Finds the routing config for an identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(RoutingConfig))` if found
    /// - `Ok(None)` if no record exists
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on connection or query failures and
    /// [`StoreError::Malformed`] when the stored record is invalid.
    async fn find_by_id(&self, id: &str) -> Result<Option<RoutingConfig>, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
