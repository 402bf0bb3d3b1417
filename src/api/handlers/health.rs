//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /_/health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok" },
///     "cache": { "status": "ok" },
///     "queue": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let ((store_ok, cache_ok), queue_ok) = tokio::join!(
        state.route_service.health(),
        state.redirect_service.queue_healthy()
    );

    let checks = HealthChecks {
        store: CheckStatus::from_probe(store_ok, "Link store unreachable"),
        cache: CheckStatus::from_probe(cache_ok, "Route cache unreachable"),
        queue: CheckStatus::from_probe(queue_ok, "Click queue unreachable"),
    };
    let all_healthy = store_ok && cache_ok && queue_ok;

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
