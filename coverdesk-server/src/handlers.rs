//! HTTP request handlers

use crate::api::{HealthResponse, HealthStatus, PolicyQueryParams};
use crate::error::{ApiError, ApiResult};
use crate::metrics::{self, LatencyTimer};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    Json,
};
use coverdesk_core::{Policy, PolicyQuery};
use tracing::{debug, info, warn};

/// List policies matching the optional filters in the query string
pub async fn list_policies(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<Policy>>> {
    metrics::record_request("policies");

    let Query(pairs) = pairs.map_err(|rejection| {
        warn!("Rejected policy query: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    let params = PolicyQueryParams::from_pairs(pairs).map_err(|err| {
        warn!("Rejected policy query: {}", err);
        err
    })?;

    let timer = LatencyTimer::new();
    let query = PolicyQuery::from(params);
    let results = crate::tracing::create_search_span(&query).in_scope(|| {
        let results = state.catalog.search(&query);
        crate::tracing::record_search_result(results.len());
        results
    });

    let elapsed = timer.elapsed_seconds();
    metrics::record_search(results.len(), elapsed);
    debug!(
        "Policy search: {} of {} matched ({:.3}ms)",
        results.len(),
        state.catalog.len(),
        elapsed * 1000.0
    );

    Ok(Json(results))
}

/// Fetch a single policy by id
pub async fn get_policy(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Policy>> {
    metrics::record_request("policy");

    let Path(id) = id.map_err(|rejection| {
        warn!("Rejected policy id: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let policy = state.catalog.get(id)?;
    Ok(Json(policy.clone()))
}

/// Distinct policy type labels
pub async fn policy_types(State(state): State<AppState>) -> Json<Vec<String>> {
    metrics::record_request("policy_types");

    Json(state.catalog.policy_types())
}

/// Health check - liveness probe
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.catalog.is_empty() {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        policy_count: state.catalog.len(),
    })
}

/// Prometheus metrics endpoint
pub async fn metrics() -> ApiResult<String> {
    metrics::get_prometheus_metrics()
        .ok_or_else(|| ApiError::Internal("Prometheus exporter not initialized".to_string()))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    info!("No route for {}", uri.path());
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
