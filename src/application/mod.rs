//! Application layer services.
//!
//! Services compose repository, cache, queue and task-runner traits into the
//! request pipeline and give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::route_service::RouteService`] - Identifier resolution with cache-aside reads
//! - [`services::redirect_service::RedirectService`] - Per-request dispatch and click emission

pub mod services;
