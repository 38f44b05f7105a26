use crate::{IdentityConflict, ReconciliationOutcome, SkipReason, SyncSummary};

use uuid::Uuid;

#[test]
fn test_summary_counts_each_outcome_kind() {
    let conflict = IdentityConflict {
        email: "a@example.com".to_string(),
        remote_external_id: "B".to_string(),
        local_user_id: Uuid::new_v4(),
        local_email: "a@example.com".to_string(),
        local_external_id: Some("A".to_string()),
    };

    let mut summary = SyncSummary::default();
    summary.record(&ReconciliationOutcome::Created);
    summary.record(&ReconciliationOutcome::Created);
    summary.record(&ReconciliationOutcome::Updated);
    summary.record(&ReconciliationOutcome::Unchanged);
    summary.record(&ReconciliationOutcome::Skipped(SkipReason::MissingFields));
    summary.record(&ReconciliationOutcome::Skipped(
        SkipReason::ExternalIdConflict(conflict.clone()),
    ));
    summary.record_failure();

    assert_eq!(summary.created, 2);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.conflicts, vec![conflict]);
    assert_eq!(summary.total(), 7);
}

#[test]
fn test_skip_reason_messages() {
    assert_eq!(
        SkipReason::MissingFields.to_string(),
        "missing email or external id"
    );
}
