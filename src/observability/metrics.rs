//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inventory_fetch_total` (counter): upstream fetches by outcome
//! - `inventory_fetch_duration_seconds` (histogram): fetch latency
//! - `inventory_document_bytes` (gauge): size of the cached document
//! - `inventory_last_fetch_timestamp_seconds` (gauge): unix time of last success
//! - `inventory_requests_total` (counter): served requests by encoding
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record the outcome of one upstream fetch.
pub fn record_fetch(outcome: &'static str, start: Instant) {
    ::metrics::counter!("inventory_fetch_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("inventory_fetch_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a newly stored document.
pub fn record_document_stored(len: usize) {
    ::metrics::gauge!("inventory_document_bytes").set(len as f64);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    ::metrics::gauge!("inventory_last_fetch_timestamp_seconds").set(now);
}

/// Record one served request.
pub fn record_request(encoding: &'static str) {
    ::metrics::counter!("inventory_requests_total", "encoding" => encoding).increment(1);
}
