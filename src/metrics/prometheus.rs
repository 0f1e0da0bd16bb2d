use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus HTTP exporter on `addr`.
/// After this call, any metrics recorded via the `metrics` crate
/// macros (counter!, histogram!) are automatically exported at /metrics.
/// Without it the recording helpers below are no-ops.
pub fn init_metrics_server(addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    Ok(())
}

// ── Cycle metrics ────────────────────────────────────────────────

pub fn record_cycle(outcome: &'static str) {
    counter!("ticker_cycles_total", "outcome" => outcome).increment(1);
}

// ── Fetch metrics ────────────────────────────────────────────────

pub fn record_fetch_latency(endpoint: &'static str, latency_ms: f64) {
    histogram!("ticker_fetch_latency_ms", "endpoint" => endpoint).record(latency_ms);
}

// ── Render metrics ───────────────────────────────────────────────

pub fn record_render(state: &'static str) {
    counter!("ticker_renders_total", "state" => state).increment(1);
}
