//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_open_total` (counter): dispatches by outcome
//!   (`opened`, `not_found`, `errored`, `suppressed`)
//! - `router_mapping_loads_total` (counter): mapping source loads by result
//!   (`loaded`, `absent`)
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter is installed only when enabled in config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a dispatch.
pub fn record_open(outcome: &'static str) {
    metrics::counter!("router_open_total", "outcome" => outcome).increment(1);
}

/// Record a mapping source load.
pub fn record_mapping_load(loaded: bool) {
    let result = if loaded { "loaded" } else { "absent" };
    metrics::counter!("router_mapping_loads_total", "result" => result).increment(1);
}
