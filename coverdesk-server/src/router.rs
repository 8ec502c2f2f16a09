//! Route table and middleware stack

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router with CORS and request tracing.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        // Policy endpoints
        .route("/api/policies", get(handlers::list_policies))
        .route("/api/policies/:id", get(handlers::get_policy))
        .route("/api/policy-types", get(handlers::policy_types))
        // Health checks
        .route("/health/live", get(handlers::health_live))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .with_state(state);

    let app = if config.compression {
        app.layer(CompressionLayer::new())
    } else {
        app
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
}
