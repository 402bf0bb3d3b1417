//! Redirect dispatch: resolve, validate, select, emit.

use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::application::services::route_service::{ResolveError, RouteService};
use crate::domain::click_event::{ClickEvent, QueueMessage};
use crate::domain::destination::select_destination;
use crate::domain::geo::{GeoContext, GeoMetadata};
use crate::domain::queue::EventQueue;
use crate::domain::tasks::BackgroundTasks;
use crate::error::AppError;

/// How link-store failures are reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreErrorPolicy {
    /// Answer 404, same as a missing identifier.
    #[default]
    NotFound,
    /// Answer 503 so store outages are visible to callers.
    Unavailable,
}

impl FromStr for StoreErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "not_found" => Ok(Self::NotFound),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(format!(
                "expected 'not_found' or 'unavailable', got '{}'",
                other
            )),
        }
    }
}

/// Coordinates a single redirect request.
///
/// # Request Flow
///
/// 1. Resolve the identifier (missing -> 404, store error -> policy)
/// 2. Validate the geo context (invalid -> 400)
/// 3. Select the destination for the requester's country
/// 4. Build a [`ClickEvent`] stamped with the dispatch time
/// 5. Submit its emission as a background task, without awaiting it
/// 6. Hand the destination back for the redirect response
///
/// Steps 1 and 2 run exactly once and in this order, so an unknown
/// identifier is never reported as bad metadata. Nothing is emitted unless
/// step 5 is reached.
pub struct RedirectService {
    routes: Arc<RouteService>,
    queue: Arc<dyn EventQueue>,
    tasks: Arc<dyn BackgroundTasks>,
    store_error_policy: StoreErrorPolicy,
}

impl RedirectService {
    pub fn new(
        routes: Arc<RouteService>,
        queue: Arc<dyn EventQueue>,
        tasks: Arc<dyn BackgroundTasks>,
        store_error_policy: StoreErrorPolicy,
    ) -> Self {
        Self {
            routes,
            queue,
            tasks,
            store_error_policy,
        }
    }

    /// Dispatches a request and returns the destination URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::DestinationNotFound`] if the identifier does not resolve
    ///   (or the store failed under [`StoreErrorPolicy::NotFound`])
    /// - [`AppError::StoreUnavailable`] if the store failed under
    ///   [`StoreErrorPolicy::Unavailable`]
    /// - [`AppError::InvalidGeoMetadata`] if the geo context fails validation
    pub async fn dispatch(&self, id: &str, geo: &GeoContext) -> Result<String, AppError> {
        let config = match self.routes.resolve(id).await {
            Ok(config) => config,
            Err(ResolveError::NotFound) => {
                debug!(link_id = %id, "Unknown link");
                record_outcome("not_found");
                return Err(AppError::DestinationNotFound);
            }
            Err(ResolveError::Store(e)) => {
                error!(link_id = %id, error = %e, "Route store lookup failed");
                record_outcome("store_error");
                return Err(match self.store_error_policy {
                    StoreErrorPolicy::NotFound => AppError::DestinationNotFound,
                    StoreErrorPolicy::Unavailable => AppError::StoreUnavailable,
                });
            }
        };

        let geo = GeoMetadata::try_from(geo).inspect_err(|e| {
            debug!(link_id = %id, errors = %e, "Rejecting request with invalid geo metadata");
            record_outcome("invalid_geo");
        })?;

        let destination = select_destination(&config, Some(&geo.country)).to_string();

        let event = ClickEvent::new(id, &geo, &destination, &config.account_id, Utc::now());
        self.emit(event);

        record_outcome("redirected");
        Ok(destination)
    }

    fn emit(&self, event: ClickEvent) {
        let queue = Arc::clone(&self.queue);

        self.tasks.submit(Box::pin(async move {
            let link_id = event.id.clone();
            match queue.send(QueueMessage::LinkClick(event)).await {
                Ok(()) => {
                    metrics::counter!("click_events_emitted_total").increment(1);
                }
                Err(e) => {
                    metrics::counter!("click_events_failed_total").increment(1);
                    warn!(link_id = %link_id, error = %e, "Failed to emit click event");
                }
            }
        }));
    }

    /// Checks the event queue transport.
    pub async fn queue_healthy(&self) -> bool {
        self.queue.health_check().await
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("redirect_outcomes_total", "outcome" => outcome).increment(1);
}
