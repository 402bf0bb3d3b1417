//! Event emission channel abstraction.

use async_trait::async_trait;

use crate::domain::click_event::QueueMessage;

/// Errors raised while handing a message to the queue transport.
///
/// These never reach an HTTP response; callers log and count them.
#[derive(Debug, thiserror::Error)]
pub enum EmissionError {
    #[error("failed to serialize queue message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("queue transport error: {0}")]
    Transport(String),
}

/// Asynchronous send primitive for click events.
///
/// Implementations own any retry or redelivery they offer; the redirect path
/// only submits and never waits on the result.
///
/// # Implementations
///
/// - [`crate::infrastructure::queue::RedisEventQueue`] - Redis list producer
/// - [`crate::infrastructure::queue::NullEventQueue`] - Drops every message
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// Sends one message to the queue.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionError`] when the message could not be serialized or
    /// the transport rejected it after the implementation's own retries.
    async fn send(&self, message: QueueMessage) -> Result<(), EmissionError>;

    /// Checks if the queue transport is reachable.
    async fn health_check(&self) -> bool;
}
