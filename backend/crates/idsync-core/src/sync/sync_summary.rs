use crate::{IdentityConflict, ReconciliationOutcome, SkipReason};

use serde::Serialize;

/// Per-outcome counts for one batch pass.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub conflicts: Vec<IdentityConflict>,
}

impl SyncSummary {
    pub fn record(&mut self, outcome: &ReconciliationOutcome) {
        match outcome {
            ReconciliationOutcome::Created => self.created += 1,
            ReconciliationOutcome::Updated => self.updated += 1,
            ReconciliationOutcome::Unchanged => self.unchanged += 1,
            ReconciliationOutcome::Skipped(reason) => {
                self.skipped += 1;
                if let SkipReason::ExternalIdConflict(conflict) = reason {
                    self.conflicts.push(conflict.clone());
                }
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged + self.skipped + self.failed
    }
}
