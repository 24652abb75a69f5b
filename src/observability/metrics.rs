//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_proxy_requests_total` (counter): proxy calls by outcome, status
//! - `gateway_proxy_duration_seconds` (histogram): time spent per proxy call

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::proxy::ProxyOutcome;

pub const PROXY_REQUESTS_TOTAL: &str = "gateway_proxy_requests_total";
pub const PROXY_DURATION_SECONDS: &str = "gateway_proxy_duration_seconds";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished proxy call.
pub fn record_proxy(outcome: &ProxyOutcome, start_time: Instant) {
    let outcome_label = outcome.label();
    let status = outcome.status().as_u16().to_string();

    ::metrics::counter!(PROXY_REQUESTS_TOTAL, "outcome" => outcome_label, "status" => status).increment(1);
    ::metrics::histogram!(PROXY_DURATION_SECONDS, "outcome" => outcome_label)
        .record(start_time.elapsed().as_secs_f64());
}
