//! Metrics collection and exposition.
//!
//! # Metrics
//! - `switchyard_requests_total` (counter): dispatched requests by method, status, outcome
//! - `switchyard_request_duration_seconds` (histogram): dispatch latency by method, outcome
//! - `switchyard_routes_registered_total` (counter): registrations by change (inserted/updated)
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so the library
//!   and its tests never need an exporter
//! - Prometheus exposition is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RouteChange;

/// Install the Prometheus exporter listening on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!("switchyard_requests_total", "Requests dispatched");
            describe_histogram!("switchyard_request_duration_seconds", "Time spent dispatching a request");
            describe_counter!("switchyard_routes_registered_total", "Route registrations");
            tracing::info!(address = %addr, "Metrics endpoint started");
        }
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    counter!(
        "switchyard_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "switchyard_request_duration_seconds",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_route_registered(change: RouteChange) {
    counter!("switchyard_routes_registered_total", "change" => change.as_str()).increment(1);
}
