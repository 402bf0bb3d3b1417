//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod route_repository;

pub use route_repository::{RouteRepository, StoreError};

#[cfg(test)]
pub use route_repository::MockRouteRepository;
