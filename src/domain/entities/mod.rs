//! Core domain entities.
//!
//! Entities are plain data structures read from the link store; this service
//! treats them as read-only.
//!
//! - [`RoutingConfig`] - Per-link default destination plus country overrides
//! - [`Destinations`] - The destination map inside a routing config

pub mod routing_config;

pub use routing_config::{Destinations, RoutingConfig};
