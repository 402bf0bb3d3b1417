//! Redis list producer for click events.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::QueueMessage;
use crate::domain::queue::{EmissionError, EventQueue};

/// Retry schedule for queue pushes.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: usize,
    /// Delay before the first retry; doubles afterwards.
    pub base_delay_ms: u64,
}

impl RetryPolicy {
    const MAX_DELAY: Duration = Duration::from_secs(2);

    /// Backoff delays without jitter: `base`, `2 * base`, `4 * base`, ...
    ///
    /// `ExponentialBackoff` starts at `2 * factor`, so the schedule runs at
    /// twice the base and is halved afterwards.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        ExponentialBackoff::from_millis(2)
            .factor(self.base_delay_ms)
            .max_delay(Self::MAX_DELAY * 2)
            .map(|delay| delay / 2)
            .take(self.max_retries)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 50,
        }
    }
}

/// Pushes serialized [`QueueMessage`]s onto a Redis list with `RPUSH`.
///
/// Consumers pop from the other end. Transient failures are retried with
/// exponential backoff and jitter before the send is reported as failed.
pub struct RedisEventQueue {
    client: ConnectionManager,
    queue_key: String,
    retry: RetryPolicy,
}

impl RedisEventQueue {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionError::Transport`] if the connection cannot be established.
    pub async fn connect(
        redis_url: &str,
        queue_key: &str,
        retry: RetryPolicy,
    ) -> Result<Self, EmissionError> {
        info!("Connecting click queue to Redis (list '{}')", queue_key);

        let client = Client::open(redis_url)
            .map_err(|e| EmissionError::Transport(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| EmissionError::Transport(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| EmissionError::Transport(format!("Redis PING failed: {}", e)))?;

        info!("✓ Click queue connected to Redis");

        Ok(Self {
            client: manager,
            queue_key: queue_key.to_string(),
            retry,
        })
    }
}

#[async_trait]
impl EventQueue for RedisEventQueue {
    async fn send(&self, message: QueueMessage) -> Result<(), EmissionError> {
        let payload = serde_json::to_string(&message)?;
        let strategy = self.retry.delays().map(jitter);

        let depth = Retry::start(strategy, || {
            let mut conn = self.client.clone();
            let key = self.queue_key.clone();
            let payload = payload.clone();
            async move {
                conn.rpush::<_, _, i64>(&key, payload).await.inspect_err(|e| {
                    warn!(queue = %key, error = %e, "Click queue push failed");
                })
            }
        })
        .await
        .map_err(|e| EmissionError::Transport(e.to_string()))?;

        debug!(queue = %self.queue_key, depth, "Click event queued");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delays_double_from_base() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay_ms: 50,
        };

        let delays: Vec<Duration> = policy.delays().collect();

        assert_eq!(
            delays,
            vec![
                Duration::from_millis(50),
                Duration::from_millis(100),
                Duration::from_millis(200),
            ]
        );
    }

    #[test]
    fn test_retry_delays_keep_odd_base() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay_ms: 75,
        };

        let delays: Vec<Duration> = policy.delays().collect();

        assert_eq!(
            delays,
            vec![
                Duration::from_millis(75),
                Duration::from_millis(150),
                Duration::from_millis(300),
            ]
        );
    }

    #[test]
    fn test_retry_delays_one_millisecond_base() {
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay_ms: 1,
        };

        let delays: Vec<Duration> = policy.delays().collect();

        assert_eq!(delays, vec![Duration::from_millis(1), Duration::from_millis(2)]);
    }

    #[test]
    fn test_retry_delays_are_capped() {
        let policy = RetryPolicy {
            max_retries: 10,
            base_delay_ms: 500,
        };

        assert!(policy.delays().all(|d| d <= RetryPolicy::MAX_DELAY));
    }

    #[test]
    fn test_zero_retries() {
        let policy = RetryPolicy {
            max_retries: 0,
            base_delay_ms: 50,
        };

        assert_eq!(policy.delays().count(), 0);
    }
}
