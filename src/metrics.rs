use anyhow::Result;
use metrics::{counter, histogram};
use std::time::Duration;

/// Metric names and recording helpers for the record pipeline.
///
/// The library never installs a recorder on its own; without one every call
/// is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCollector {
    // Decode metrics
    pub records_decoded_total: &'static str,
    pub decode_duration: &'static str,
    pub decode_failures_total: &'static str,

    // Mutation metrics
    pub tag_updates_total: &'static str,
    pub records_opened_total: &'static str,

    // Export metrics
    pub exports_total: &'static str,
    pub export_size_bytes: &'static str,

    // Filter metrics
    pub filter_passes_total: &'static str,
    pub filter_kept_ratio: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            records_decoded_total: "email_archive_records_decoded_total",
            decode_duration: "email_archive_decode_duration_seconds",
            decode_failures_total: "email_archive_decode_failures_total",

            tag_updates_total: "email_archive_tag_updates_total",
            records_opened_total: "email_archive_records_opened_total",

            exports_total: "email_archive_exports_total",
            export_size_bytes: "email_archive_export_size_bytes",

            filter_passes_total: "email_archive_filter_passes_total",
            filter_kept_ratio: "email_archive_filter_kept_ratio",
        }
    }
}

impl MetricsCollector {
    /// Install a no-op global recorder
    pub fn init() -> Result<()> {
        metrics::set_global_recorder(metrics::NoopRecorder)
            .map_err(|e| anyhow::anyhow!("Failed to initialize metrics recorder: {}", e))?;

        Ok(())
    }

    /// Record a successful decode
    pub fn record_decode(&self, count: usize, duration: Duration) {
        counter!(self.records_decoded_total).increment(count as u64);
        histogram!(self.decode_duration).record(duration.as_secs_f64());
    }

    /// Record a failed decode, labelled by error kind
    pub fn record_decode_failure(&self, kind: &'static str) {
        counter!(self.decode_failures_total, "kind" => kind).increment(1);
    }

    /// Record a tag mutation
    pub fn record_tag_update(&self) {
        counter!(self.tag_updates_total).increment(1);
    }

    /// Record a record being opened for the first time
    pub fn record_opened(&self) {
        counter!(self.records_opened_total).increment(1);
    }

    /// Record an export generation
    pub fn record_export(&self, record_count: usize, size_bytes: usize) {
        counter!(self.exports_total).increment(1);
        histogram!(self.export_size_bytes, "records" => bucket(record_count)).record(size_bytes as f64);
    }

    /// Record one pass of the filter pipeline
    pub fn record_filter(&self, total: usize, kept: usize) {
        counter!(self.filter_passes_total).increment(1);
        if total > 0 {
            histogram!(self.filter_kept_ratio).record(kept as f64 / total as f64);
        }
    }
}

/// Coarse size bucket used as a label so cardinality stays bounded
const fn bucket(count: usize) -> &'static str {
    match count {
        0..=99 => "lt100",
        100..=9_999 => "lt10k",
        _ => "gte10k",
    }
}
