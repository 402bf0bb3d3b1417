#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::StatusCode;
use geo_redirect::application::services::{RedirectService, RouteService, StoreErrorPolicy};
use geo_redirect::domain::click_event::QueueMessage;
use geo_redirect::domain::entities::RoutingConfig;
use geo_redirect::domain::queue::{EmissionError, EventQueue};
use geo_redirect::domain::repositories::RouteRepository;
use geo_redirect::domain::tasks::{BackgroundTask, BackgroundTasks};
use geo_redirect::infrastructure::cache::NullRouteCache;
use geo_redirect::infrastructure::persistence::MemoryRouteRepository;
use geo_redirect::state::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn abc_route() -> RoutingConfig {
    RoutingConfig::new("abc", "acct_1", "https://a.example")
        .with_override("US", "https://us.example")
}

pub fn test_repository() -> Arc<MemoryRouteRepository> {
    Arc::new(MemoryRouteRepository::new([abc_route()]))
}

/// Event queue that keeps every message it was sent.
#[derive(Default)]
pub struct RecordingQueue {
    messages: Mutex<Vec<QueueMessage>>,
    delay: Option<Duration>,
    healthy: bool,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    /// Queue whose sends take `delay` to complete.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn unhealthy() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<QueueMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventQueue for RecordingQueue {
    async fn send(&self, message: QueueMessage) -> Result<(), EmissionError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.messages.lock().unwrap().push(message);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

/// Collects background tasks so tests can run them after the response.
#[derive(Default)]
pub struct DeferredTasks {
    pending: Mutex<Vec<BackgroundTask>>,
}

impl DeferredTasks {
    pub async fn run_all(&self) {
        let tasks: Vec<BackgroundTask> = std::mem::take(&mut *self.pending.lock().unwrap());
        for task in tasks {
            task.await;
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

impl BackgroundTasks for DeferredTasks {
    fn submit(&self, task: BackgroundTask) {
        self.pending.lock().unwrap().push(task);
    }
}

pub fn create_test_state(
    repository: Arc<dyn RouteRepository>,
    queue: Arc<dyn EventQueue>,
    tasks: Arc<dyn BackgroundTasks>,
) -> AppState {
    create_test_state_with(repository, queue, tasks, StoreErrorPolicy::NotFound, StatusCode::FOUND)
}

pub fn create_test_state_with(
    repository: Arc<dyn RouteRepository>,
    queue: Arc<dyn EventQueue>,
    tasks: Arc<dyn BackgroundTasks>,
    policy: StoreErrorPolicy,
    redirect_status: StatusCode,
) -> AppState {
    let route_service = Arc::new(RouteService::new(
        repository,
        Arc::new(NullRouteCache::new()),
        tasks.clone(),
    ));
    let redirect_service = Arc::new(RedirectService::new(
        route_service.clone(),
        queue,
        tasks,
        policy,
    ));

    AppState::new(route_service, redirect_service, redirect_status)
}
