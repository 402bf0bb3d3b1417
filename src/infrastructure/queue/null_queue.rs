//! No-op event queue.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::click_event::QueueMessage;
use crate::domain::queue::{EmissionError, EventQueue};

/// Drops every message.
///
/// Used when no queue transport is configured, so redirects keep working
/// without analytics.
pub struct NullEventQueue;

impl NullEventQueue {
    pub fn new() -> Self {
        debug!("Using NullEventQueue (click events are discarded)");
        Self
    }
}

impl Default for NullEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventQueue for NullEventQueue {
    async fn send(&self, message: QueueMessage) -> Result<(), EmissionError> {
        let QueueMessage::LinkClick(event) = message;
        debug!(link_id = %event.id, "Discarding click event");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
