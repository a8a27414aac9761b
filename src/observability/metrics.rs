//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_lookups_total` (counter): lookups by verb and outcome (hit, miss);
//!   non-standard verbs share one `OTHER` label
//! - `dispatch_lookup_duration_seconds` (histogram): lookup latency
//! - `dispatch_routes` (gauge): routes in the serving table
//! - `dispatch_reloads_total` (counter): table reloads by outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus exporter is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Verb;

const KNOWN_VERBS: [&str; 9] = [
    Verb::GET,
    Verb::HEAD,
    Verb::POST,
    Verb::PUT,
    Verb::DELETE,
    Verb::TRACE,
    Verb::OPTIONS,
    Verb::CONNECT,
    Verb::PATCH,
];

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!("dispatch_lookups_total", "Route lookups by verb and outcome");
    metrics::describe_histogram!(
        "dispatch_lookup_duration_seconds",
        metrics::Unit::Seconds,
        "Route lookup latency"
    );
    metrics::describe_gauge!("dispatch_routes", "Routes in the serving table");
    metrics::describe_counter!("dispatch_reloads_total", "Route table reloads by outcome");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Bounded label for a requested verb: standard methods pass through,
/// anything else collapses into `OTHER`, no verb is `NONE`.
pub fn verb_label(verb: Option<&str>) -> &'static str {
    match verb {
        None => "NONE",
        Some(verb) => KNOWN_VERBS
            .iter()
            .copied()
            .find(|known| *known == verb)
            .unwrap_or("OTHER"),
    }
}

pub fn record_lookup(verb: Option<&str>, matched: bool, start: Instant) {
    let outcome = if matched { "hit" } else { "miss" };
    metrics::counter!(
        "dispatch_lookups_total",
        "verb" => verb_label(verb),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("dispatch_lookup_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_route_count(count: usize) {
    metrics::gauge!("dispatch_routes").set(count as f64);
}

pub fn record_reload(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("dispatch_reloads_total", "outcome" => outcome).increment(1);
}
