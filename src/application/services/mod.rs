//! Business logic services for the application layer.

pub mod redirect_service;
pub mod route_service;

pub use redirect_service::{RedirectService, StoreErrorPolicy};
pub use route_service::{ResolveError, RouteService};
