//! Logging and OpenTelemetry tracing setup for the Coverdesk server

use crate::config::ServerConfig;
use coverdesk_core::PolicyQuery;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{self, RandomIdGenerator, Sampler},
    Resource,
};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, FmtSubscriber, Registry,
};

/// Build the env filter, preferring `RUST_LOG` over the configured fallback
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize OpenTelemetry with OTLP exporter
pub fn init_telemetry(
    service_name: &str,
    config: &ServerConfig,
) -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    let resource = Resource::new(vec![
        KeyValue::new("service.name", service_name.to_string()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(config.otel_endpoint.clone())
        .with_timeout(Duration::from_secs(3));

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            trace::config()
                .with_sampler(sampler_for(config.otel_sample_rate))
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)?;

    Ok(tracer)
}

/// Map a sample rate to a sampler
pub fn sampler_for(sample_rate: f64) -> Sampler {
    if sample_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sample_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sample_rate)
    }
}

/// Initialize the complete tracing stack (console + OpenTelemetry)
pub fn init_tracing_stack(service_name: &str, config: &ServerConfig) -> anyhow::Result<()> {
    let tracer = init_telemetry(service_name, config)?;
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true);

    Registry::default()
        .with(env_filter(&config.log_filter))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

/// Initialize plain console logging
pub fn init_console(log_filter: &str) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(log_filter))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Initialize logging as configured. Returns whether OpenTelemetry is active.
pub fn init_from_config(service_name: &str, config: &ServerConfig) -> anyhow::Result<bool> {
    if config.otel_enabled {
        init_tracing_stack(service_name, config)?;
        Ok(true)
    } else {
        init_console(&config.log_filter)?;
        Ok(false)
    }
}

/// Shutdown OpenTelemetry provider
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Create a span describing a policy search
pub fn create_search_span(query: &PolicyQuery) -> tracing::Span {
    tracing::info_span!(
        "policy_search",
        policy_name = ?query.name,
        policy_type = ?query.policy_type,
        min_premium = ?query.min_premium,
        max_premium = ?query.max_premium,
        min_coverage = ?query.min_coverage,
        sort = ?query.sort,
        matched = tracing::field::Empty,
        otel.kind = "server",
        otel.status_code = tracing::field::Empty,
    )
}

/// Record the search outcome in the current span
pub fn record_search_result(matched: usize) {
    let span = tracing::Span::current();
    span.record("matched", matched);
    span.record("otel.status_code", "OK");
}
