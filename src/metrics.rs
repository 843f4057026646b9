//! Prometheus request metrics middleware.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Build the metrics middleware; it also serves the `/metrics` endpoint.
/// Health probes are left out of the request histograms.
pub fn build() -> Result<PrometheusMetrics, Box<dyn std::error::Error + Send + Sync>> {
    PrometheusMetricsBuilder::new("pokefumi")
        .endpoint("/metrics")
        .exclude("/api/healthz")
        .build()
}
