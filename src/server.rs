//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, worker spawning, and the Axum server lifecycle.

use crate::application::services::ResolutionPolicy;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::infrastructure::persistence::{
    InMemoryClickRepository, InMemoryMappingRepository, PgClickRepository, PgMappingRepository,
};
use crate::infrastructure::task_pool::{TaskPool, TaskPoolConfig};
use crate::infrastructure::validation::HttpReachabilityValidator;
use crate::routes::app_router;
use crate::state::{AppState, StateOptions};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const CLICK_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL pool and migrations, or the in-memory store
/// - Task pool for probes and interstitial deliveries
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (mappings, clicks) = open_storage(&config).await?;

    let task_pool = TaskPool::new(TaskPoolConfig {
        workers: config.task_pool_workers,
        queue_capacity: config.task_pool_queue_capacity,
    });
    tracing::info!(
        workers = config.task_pool_workers,
        queue = config.task_pool_queue_capacity,
        "Task pool started"
    );

    let reachability = HttpReachabilityValidator::new(Duration::from_secs(
        config.probe_timeout_secs,
    ))
    .context("Failed to build HTTP client for reachability probes")?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let click_worker = tokio::spawn(run_click_worker(
        click_rx,
        clicks.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let state = AppState::new(
        mappings,
        clicks,
        Arc::new(reachability),
        click_tx,
        task_pool,
        StateOptions {
            base_url: config.base_url.clone(),
            behind_proxy: config.behind_proxy,
            verify_reachability_on_create: config.verify_reachability_on_create,
            resolution_policy: if config.revalidate_on_resolve {
                ResolutionPolicy::Revalidate
            } else {
                ResolutionPolicy::StoredOnly
            },
            ..StateOptions::default()
        },
    );
    tracing::info!(
        policy = ?state.resolution_service.policy(),
        interstitial_delay_ms = state.notifier.delay().as_millis() as u64,
        "Resolution configured"
    );

    let notifier = state.notifier.clone();
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Queued clicks drain once the last sender is dropped.
    match tokio::time::timeout(CLICK_DRAIN_TIMEOUT, click_worker).await {
        Ok(Ok(())) => tracing::info!("Click queue drained"),
        Ok(Err(e)) => tracing::warn!("Click worker ended abnormally: {}", e),
        Err(_) => tracing::warn!("Click queue not drained within {:?}", CLICK_DRAIN_TIMEOUT),
    }

    tracing::info!(
        delivered = notifier.delivered(),
        aborted = notifier.aborted(),
        "Interstitial notifications"
    );
    tracing::info!("Server stopped");
    Ok(())
}

async fn open_storage(
    config: &Config,
) -> Result<(Arc<dyn MappingRepository>, Arc<dyn ClickRepository>)> {
    let Some(ref database_url) = config.database_url else {
        tracing::warn!("No database configured, mappings are kept in memory only");
        return Ok((
            Arc::new(InMemoryMappingRepository::new()),
            Arc::new(InMemoryClickRepository::new()),
        ));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    Ok((
        Arc::new(PgMappingRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
