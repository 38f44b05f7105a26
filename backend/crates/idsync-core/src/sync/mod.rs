pub mod identity_conflict;
pub mod reconciliation_outcome;
pub mod skip_reason;
pub mod sync_summary;
