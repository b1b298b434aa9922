//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, worker spawning, and Axum server lifecycle.

use crate::application::services::{RegistrySettings, SharedRegistry, run_visit_worker};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::infrastructure::persistence::{
    MemoryDatabase, MemoryLinkRepository, MemoryVisitRepository, PgLinkRepository,
    PgVisitRepository,
};
use crate::infrastructure::qr_renderer::QrRenderer;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long the visit worker gets to flush queued visits on shutdown.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a PostgreSQL pool with the configured limits and applies migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Builds the registry over the configured storage backend.
///
/// # Errors
///
/// Returns an error if the PostgreSQL backend is selected and cannot be reached.
pub async fn build_registry(config: &Config) -> Result<Arc<SharedRegistry>> {
    let (links, visits): (Arc<dyn LinkRepository>, Arc<dyn VisitRepository>) =
        match config.storage_backend {
            StorageBackend::Postgres => {
                let pool = Arc::new(connect_database(config).await?);
                (
                    Arc::new(PgLinkRepository::new(pool.clone())),
                    Arc::new(PgVisitRepository::new(pool)),
                )
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                let db = MemoryDatabase::new();
                (
                    Arc::new(MemoryLinkRepository::new(db.clone())),
                    Arc::new(MemoryVisitRepository::new(db)),
                )
            }
        };

    let settings = RegistrySettings::new(config.base_url.clone())
        .with_code_length(config.code_length)
        .with_max_attempts(config.code_max_attempts);

    Ok(Arc::new(SharedRegistry::new(links, visits, settings)))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL with migrations, or in-memory)
/// - Background visit worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let registry = build_registry(&config).await?;

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);
    let worker = tokio::spawn(run_visit_worker(
        visit_rx,
        registry.clone(),
        config.visit_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.visit_worker_concurrency,
        "Visit worker started"
    );

    let state = AppState::new(registry, visit_tx, QrRenderer::new(config.qr_size));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it the last sender) is gone; let the worker drain.
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(_) => tracing::info!("Shutdown complete"),
        Err(_) => tracing::warn!("Visit worker did not finish in time, pending visits lost"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
