//! Domain layer containing entities, pure rules and the contracts the
//! infrastructure layer implements.
//!
//! # Architecture
//!
//! - [`entities`] - Routing records read from the link store
//! - [`repositories`] - Data access trait definitions
//! - [`geo`] - Raw geo context and its validated form
//! - [`destination`] - Country-based destination selection
//! - [`click_event`] - Click event model and queue envelope
//! - [`queue`] - Event emission channel contract
//! - [`tasks`] - Background task submission contract
//!
//! # Click Flow
//!
//! 1. HTTP handler extracts a [`geo::GeoContext`] from the request
//! 2. [`crate::application::services::RedirectService`] resolves and validates
//! 3. A [`click_event::ClickEvent`] is submitted through [`tasks::BackgroundTasks`]
//! 4. The background task sends it via [`queue::EventQueue`]

pub mod click_event;
pub mod destination;
pub mod entities;
pub mod geo;
pub mod queue;
pub mod repositories;
pub mod tasks;
