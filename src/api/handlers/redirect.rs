//! Handler for link redirects.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::domain::geo::GeoContext;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a link identifier to the destination for the requester's country.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Request Flow
///
/// 1. Read the raw geo context from `cf-ipcountry`, `cf-iplatitude`, `cf-iplongitude`
/// 2. Resolve the identifier (route cache, then link store)
/// 3. Validate the geo context
/// 4. Pick the country override or the default destination
/// 5. Schedule the click event in the background
/// 6. Respond with the configured redirect status (302 by default)
///
/// The response never waits on click emission.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier doesn't resolve, including a path
/// segment that does not decode to UTF-8.
/// Returns 400 Bad Request if the geo metadata is invalid.
/// Returns 503 Service Unavailable on store failure when configured to.
pub async fn redirect_handler(
    id: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
    geo: GeoContext,
) -> Result<Response, AppError> {
    let Path(id) = id.map_err(|rejection| {
        debug!(error = %rejection, "Undecodable link identifier");
        AppError::DestinationNotFound
    })?;

    let destination = state.redirect_service.dispatch(&id, &geo).await?;

    let location = HeaderValue::try_from(destination.as_str()).map_err(|e| {
        error!(link_id = %id, error = %e, "Destination is not a valid Location header");
        AppError::DestinationNotFound
    })?;

    Ok((state.redirect_status, [(header::LOCATION, location)]).into_response())
}
