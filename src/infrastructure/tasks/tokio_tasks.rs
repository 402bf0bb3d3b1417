//! Background task execution on the tokio runtime.

use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use crate::domain::tasks::{BackgroundTask, BackgroundTasks};

/// Spawns submitted tasks onto the current tokio runtime and keeps count of
/// the ones still running.
///
/// Spawned tasks are detached from the request future, so a client that
/// disconnects after the redirect does not cancel its click emission.
/// [`Self::shutdown`] lets the server drain them before exiting.
#[derive(Debug, Clone, Default)]
pub struct TokioBackgroundTasks {
    tracker: TaskTracker,
}

impl TokioBackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submitted tasks that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Closes the tracker and waits up to `grace` for running tasks.
    ///
    /// Returns `true` when every task finished within the grace period.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();

        let pending = self.tracker.len();
        if pending > 0 {
            info!(pending, "Waiting for background tasks to finish");
        }

        match tokio::time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => true,
            Err(_) => {
                warn!(
                    abandoned = self.tracker.len(),
                    "Background tasks did not finish within {:?}", grace
                );
                false
            }
        }
    }
}

impl BackgroundTasks for TokioBackgroundTasks {
    fn submit(&self, task: BackgroundTask) {
        self.tracker.spawn(task);
    }
}
