//! Server lifecycle: logging, metrics, bind, serve, graceful shutdown

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;
use tracing::{info, warn};

/// Initialize logging and metrics, then serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let otel_enabled = crate::tracing::init_from_config("coverdesk-server", &config)?;
    if otel_enabled {
        info!("OpenTelemetry tracing enabled ({})", config.otel_endpoint);
    } else {
        info!("Console logging enabled (set OTEL_ENABLED=true for OpenTelemetry)");
    }

    info!("Starting Coverdesk HTTP Server v{}", env!("CARGO_PKG_VERSION"));

    crate::metrics::init_prometheus()?;
    crate::metrics::init_metrics();

    let state = AppState::builtin();
    info!("Loaded {} policies", state.catalog.len());

    let addr = config.socket_addr()?;
    let app = build_router(state, &config);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        crate::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, shutting down gracefully..."),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
