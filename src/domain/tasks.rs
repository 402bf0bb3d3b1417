//! Deferred execution capability.

use std::future::Future;
use std::pin::Pin;

/// A unit of work that outlives the request that scheduled it.
pub type BackgroundTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Schedules work to run after (or independently of) the HTTP response.
///
/// Submission must return immediately. Once submitted, a task is allowed to
/// finish even if the request that scheduled it is cancelled.
///
/// # Implementations
///
/// - [`crate::infrastructure::tasks::TokioBackgroundTasks`] - Tracked tokio spawns
pub trait BackgroundTasks: Send + Sync {
    fn submit(&self, task: BackgroundTask);
}

/// Task runner for unit tests: collects submissions and runs them on demand.
#[cfg(test)]
pub(crate) mod testing {
    use super::{BackgroundTask, BackgroundTasks};
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct DeferredTasks {
        pending: Mutex<Vec<BackgroundTask>>,
    }

    impl DeferredTasks {
        pub(crate) async fn run_all(&self) {
            let tasks: Vec<BackgroundTask> = std::mem::take(&mut *self.pending.lock().unwrap());
            for task in tasks {
                task.await;
            }
        }

        pub(crate) fn len(&self) -> usize {
            self.pending.lock().unwrap().len()
        }
    }

    impl BackgroundTasks for DeferredTasks {
        fn submit(&self, task: BackgroundTask) {
            self.pending.lock().unwrap().push(task);
        }
    }
}
