//! Event queue transports for click events.
//!
//! - [`RedisEventQueue`] - Pushes JSON messages onto a Redis list with retry
//! - [`NullEventQueue`] - Discards messages when no transport is configured

mod null_queue;
mod redis_queue;

pub use null_queue::NullEventQueue;
pub use redis_queue::{RedisEventQueue, RetryPolicy};
