//! Shared handler state.

use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::services::{RedirectService, RouteService};

/// Application state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub route_service: Arc<RouteService>,
    pub redirect_service: Arc<RedirectService>,
    /// Status used for successful redirects; always a 3xx code.
    pub redirect_status: StatusCode,
}

impl AppState {
    pub fn new(
        route_service: Arc<RouteService>,
        redirect_service: Arc<RedirectService>,
        redirect_status: StatusCode,
    ) -> Self {
        Self {
            route_service,
            redirect_service,
            redirect_status,
        }
    }
}
