//! Application builder and server lifecycle.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use fno_core::config::{AppConfig, StoreBackend};
use fno_core::error::{AppError, ErrorKind};
use fno_core::result::AppResult;
use fno_database::{DatabasePool, MemoryUserStore, PgUserStore, UserStore};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Opens the configured store. The pool is returned so the caller can
/// close it on shutdown.
pub async fn connect_store(
    config: &AppConfig,
) -> AppResult<(Arc<dyn UserStore>, Option<DatabasePool>)> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            let store = PgUserStore::new(pool.pool().clone());
            Ok((Arc::new(store), Some(pool)))
        }
        StoreBackend::Memory => {
            info!(
                roles = ?[&config.auth.default_role, &config.auth.admin_role],
                "Using in-memory store; data is lost on exit"
            );
            let store = MemoryUserStore::with_roles(&[
                config.auth.default_role.as_str(),
                config.auth.admin_role.as_str(),
            ])
            .await;
            Ok((Arc::new(store), None))
        }
    }
}

/// Binds, serves until Ctrl+C or SIGTERM, then drains in-flight requests.
pub async fn serve(config: AppConfig, store: Arc<dyn UserStore>) -> AppResult<()> {
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    info!(%addr, "FNO server listening");

    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stop_tx.send(true);
        })
        .into_future();

    // Bounds how long open connections may keep the process alive once
    // a signal has arrived.
    let drain_deadline = async move {
        let _ = stop_rx.wait_for(|stopping| *stopping).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;
        }
        _ = drain_deadline => {
            warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out; dropping open connections");
        }
    }

    info!("FNO server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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
    info!("Shutdown signal received");
}
