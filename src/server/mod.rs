mod error;
pub mod handlers;
mod types;

pub use error::{ApiError, ApiErrorKind};
pub use handlers::AppState;
pub use types::{API_VERSION, DOCS_VERSION, HealthResponse, SERVICE_NAME, SimilarityResponse};

use crate::{Result, config::Config, similarity::ProcessWorker};
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Builds the full route table around `state`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/docs", get(handlers::docs))
        .route("/api/v1/similarity", post(handlers::similarity))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let worker = ProcessWorker::new(config.worker.clone());
    info!(
        "Using worker command: {} {} (timeout {:?})",
        config.worker.command,
        config.worker.args.join(" "),
        worker.timeout()
    );

    let app = router(AppState::new(Arc::new(worker)));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting Text Similarity API server on {} ({} mode)",
        addr, config.server.mode
    );
    info!("Endpoints available:");
    info!("  GET  /                   - API information");
    info!("  GET  /health             - Health check");
    info!("  GET  /docs               - API documentation");
    info!("  POST /api/v1/similarity  - Calculate similarity");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
