//! HTTP server initialization and runtime setup.
//!
//! Builds the link store, route cache and click queue from [`Config`], wires
//! the services and runs Axum until a shutdown signal arrives.

use crate::application::services::{RedirectService, RouteService};
use crate::config::{Config, RouteStoreKind};
use crate::domain::queue::EventQueue;
use crate::domain::repositories::RouteRepository;
use crate::infrastructure::cache::{NullRouteCache, RedisRouteCache, RouteCache};
use crate::infrastructure::persistence::{MemoryRouteRepository, PgRouteRepository};
use crate::infrastructure::queue::{NullEventQueue, RedisEventQueue, RetryPolicy};
use crate::infrastructure::tasks::TokioBackgroundTasks;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum::http::StatusCode;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or a JSON file)
/// - Redis route cache (or NullRouteCache fallback)
/// - Redis click queue (or NullEventQueue fallback)
/// - Background task tracker
/// - Axum HTTP server
///
/// On shutdown, waits up to `SHUTDOWN_GRACE_SECONDS` for pending click
/// events before returning.
///
/// # Errors
///
/// Returns an error if:
/// - The link store cannot be opened
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let cache = build_cache(&config).await;
    let queue = build_queue(&config).await;

    let tasks = TokioBackgroundTasks::new();
    let shared_tasks = Arc::new(tasks.clone());

    let route_service = Arc::new(RouteService::new(repository, cache, shared_tasks.clone()));
    let redirect_service = Arc::new(RedirectService::new(
        route_service.clone(),
        queue,
        shared_tasks,
        config.store_error_policy,
    ));

    let redirect_status = StatusCode::from_u16(config.redirect_status)
        .context("REDIRECT_STATUS is not a valid status code")?;

    let state = AppState::new(route_service, redirect_service, redirect_status);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let grace = Duration::from_secs(config.shutdown_grace_seconds);
    if !tasks.shutdown(grace).await {
        tracing::warn!(
            pending = tasks.in_flight(),
            "Shutdown grace period elapsed, dropping pending click events"
        );
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn RouteRepository>> {
    match config.route_store {
        RouteStoreKind::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres link store")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            Ok(Arc::new(PgRouteRepository::new(Arc::new(pool))))
        }
        RouteStoreKind::File => {
            let path = config
                .routes_file
                .as_deref()
                .context("ROUTES_FILE is required for the file link store")?;

            let repository = MemoryRouteRepository::from_file(path)?;
            tracing::info!(routes = repository.len(), "Loaded routes from {}", path);

            Ok(Arc::new(repository))
        }
    }
}

async fn build_cache(config: &Config) -> Arc<dyn RouteCache> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Route cache disabled (NullRouteCache)");
        return Arc::new(NullRouteCache::new());
    };

    match RedisRouteCache::connect(redis_url, &config.route_key_prefix, config.cache_ttl_seconds)
        .await
    {
        Ok(redis) => {
            tracing::info!("Route cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullRouteCache.", e);
            Arc::new(NullRouteCache::new())
        }
    }
}

async fn build_queue(config: &Config) -> Arc<dyn EventQueue> {
    let Some(redis_url) = &config.redis_url else {
        tracing::warn!("Click queue disabled, click events will be discarded");
        return Arc::new(NullEventQueue::new());
    };

    let retry = RetryPolicy {
        max_retries: config.emit_max_retries,
        base_delay_ms: config.emit_retry_base_ms,
    };

    match RedisEventQueue::connect(redis_url, &config.click_queue_key, retry).await {
        Ok(queue) => Arc::new(queue),
        Err(e) => {
            tracing::warn!("Failed to connect click queue: {}. Using NullEventQueue.", e);
            Arc::new(NullEventQueue::new())
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
