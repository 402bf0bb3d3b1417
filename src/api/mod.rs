//! HTTP layer: extractors, handlers and middleware.
//!
//! Translates requests into [`crate::application`] calls and maps results
//! onto responses.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies for JSON endpoints
//! - [`extractors`] - Geo context from visitor-location headers
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
