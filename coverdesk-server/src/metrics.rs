//! Prometheus metrics collection for the Coverdesk server

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

/// Initialize all metric descriptions
pub fn init_metrics() {
    // Counters
    describe_counter!("coverdesk_requests_total", "Total number of API requests");
    describe_counter!("coverdesk_errors_total", "Total number of error responses");

    // Histograms
    describe_histogram!("coverdesk_search_latency_seconds", "Policy search latency in seconds");
    describe_histogram!("coverdesk_search_result_size", "Number of policies returned per search");
}

/// Record a served request
pub fn record_request(endpoint: &'static str) {
    counter!("coverdesk_requests_total", 1, "endpoint" => endpoint);
}

/// Record a completed search
pub fn record_search(result_size: usize, latency_seconds: f64) {
    histogram!("coverdesk_search_result_size", result_size as f64);
    histogram!("coverdesk_search_latency_seconds", latency_seconds);
}

/// Record an error
pub fn record_error(error_type: &str) {
    counter!("coverdesk_errors_total", 1, "type" => error_type.to_string());
}

/// Timer for measuring operation latency
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for LatencyTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Initialize Prometheus exporter and store the handle
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Render metrics in Prometheus text format, if the exporter is installed
pub fn get_prometheus_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}
