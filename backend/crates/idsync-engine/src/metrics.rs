use idsync_core::{ReconciliationOutcome, SyncSummary};

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Metrics collector for reconciliation and batch runs
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "idsync" }
    }

    /// Record the outcome of one reconciled identity
    pub fn outcome_recorded(&self, trigger: &str, outcome: &ReconciliationOutcome) {
        counter!(format!("{}.reconcile.total", self.prefix)).increment(1);
        counter!(format!(
            "{}.reconcile.{}.{}",
            self.prefix,
            trigger,
            outcome.as_str()
        ))
        .increment(1);
    }

    /// Record a per-record failure
    pub fn reconcile_failed(&self, trigger: &str, error_kind: &str) {
        counter!(format!("{}.reconcile.failed", self.prefix)).increment(1);
        counter!(format!(
            "{}.reconcile.{}.failed.{}",
            self.prefix, trigger, error_kind
        ))
        .increment(1);
    }

    pub fn batch_started(&self) {
        counter!(format!("{}.batch.started", self.prefix)).increment(1);
    }

    pub fn batch_completed(&self, summary: &SyncSummary, duration: Duration) {
        counter!(format!("{}.batch.completed", self.prefix)).increment(1);
        gauge!(format!("{}.batch.last_conflicts", self.prefix)).set(summary.conflicts.len() as f64);
        gauge!(format!("{}.batch.last_failed", self.prefix)).set(summary.failed as f64);
        histogram!(format!("{}.batch.duration_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    pub fn batch_aborted(&self, error_kind: &str) {
        counter!(format!("{}.batch.aborted", self.prefix)).increment(1);
        counter!(format!("{}.batch.aborted.{}", self.prefix, error_kind)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
