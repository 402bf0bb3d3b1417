//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Route cache (Redis and no-op implementations)
//! - [`persistence`] - Link store implementations (PostgreSQL, in-memory)
//! - [`queue`] - Click event transports (Redis list, no-op)
//! - [`tasks`] - Background task runner on the tokio runtime

pub mod cache;
pub mod persistence;
pub mod queue;
pub mod tasks;
