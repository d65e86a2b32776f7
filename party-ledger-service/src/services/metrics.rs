//! Metrics collection and Prometheus export.
//!
//! Installs the Prometheus recorder and records the ledger's domain metrics
//! through the `metrics` facade.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Call once at startup before any metrics are recorded. Later calls are
/// no-ops so test binaries can build several applications.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_ledger_read(status: &'static str, elapsed: Duration) {
    counter!("ledger_reads_total", "status" => status).increment(1);
    histogram!("ledger_read_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_duplicates(count: usize) {
    if count > 0 {
        counter!("ledger_entries_deduplicated_total").increment(count as u64);
    }
}

/// `trigger` names the mutation that forced the recompute.
pub fn record_recompute(trigger: &'static str) {
    counter!("ledger_balance_recomputes_total", "trigger" => trigger).increment(1);
}

pub fn record_error(error_type: &'static str) {
    counter!("ledger_errors_total", "error_type" => error_type).increment(1);
}

/// A stored invoice/return that could not be decoded and was left out.
pub fn record_skipped_document(kind: &'static str) {
    counter!("ledger_documents_skipped_total", "kind" => kind).increment(1);
}

pub fn record_store_query(operation: &'static str, elapsed: Duration) {
    histogram!("ledger_store_query_duration_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}
