//! Link store implementations.
//!
//! - [`PgRouteRepository`] - PostgreSQL `link_routes` table
//! - [`MemoryRouteRepository`] - In-memory map, optionally loaded from a JSON file

mod memory_route_repository;
mod pg_route_repository;

pub use memory_route_repository::MemoryRouteRepository;
pub use pg_route_repository::PgRouteRepository;
