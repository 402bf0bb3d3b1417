//! Background task runners.

mod tokio_tasks;

pub use tokio_tasks::TokioBackgroundTasks;
