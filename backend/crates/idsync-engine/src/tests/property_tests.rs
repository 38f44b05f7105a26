use super::seeded_engine;

use idsync_core::{ReconciliationOutcome, RemoteIdentity};

use std::collections::HashSet;

use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// Small pools so generated batches collide on email and external id often.
fn identity() -> impl Strategy<Value = RemoteIdentity> {
    (
        prop_oneof![Just("a"), Just("b"), Just("c"), Just("d")],
        prop_oneof![Just("ext-1"), Just("ext-2"), Just("ext-3")],
        any::<bool>(),
    )
        .prop_map(|(local, external_id, shout)| {
            let email = format!("{}@example.com", local);
            let email = if shout { email.to_uppercase() } else { email };
            RemoteIdentity::new(external_id, email)
        })
}

// =========================================================================
// Property-Based Tests - Reconciliation
// =========================================================================

proptest! {
    #[test]
    fn given_any_batch_when_reconciled_then_emails_and_external_ids_stay_unique(
        identities in prop::collection::vec(identity(), 0..12)
    ) {
        let (engine, store, _) = seeded_engine();

        let summary = runtime()
            .block_on(engine.reconcile_batch("test", &identities))
            .unwrap();

        let users = store.users();
        let emails: HashSet<_> = users.iter().map(|u| u.email.clone()).collect();
        let external_ids: Vec<_> = users.iter().filter_map(|u| u.external_id.clone()).collect();
        let unique_external_ids: HashSet<_> = external_ids.iter().cloned().collect();

        prop_assert_eq!(emails.len(), users.len());
        prop_assert_eq!(unique_external_ids.len(), external_ids.len());
        prop_assert_eq!(summary.total(), identities.len());
        prop_assert_eq!(summary.failed, 0);
    }

    #[test]
    fn given_reconciled_batch_when_replayed_then_nothing_is_created_or_changed(
        identities in prop::collection::vec(identity(), 1..12)
    ) {
        let (engine, store, _) = seeded_engine();
        let rt = runtime();

        rt.block_on(engine.reconcile_batch("test", &identities)).unwrap();
        let before = store.users();
        let replay = rt.block_on(engine.reconcile_batch("test", &identities)).unwrap();

        prop_assert_eq!(replay.created, 0);
        prop_assert_eq!(replay.updated, 0);
        prop_assert_eq!(store.users(), before);
    }

    #[test]
    fn given_valid_identity_when_reconciled_twice_then_second_pass_unchanged(
        remote in identity()
    ) {
        let (engine, _, _) = seeded_engine();
        let rt = runtime();

        let first = rt.block_on(engine.reconcile("test", &remote)).unwrap();
        let second = rt.block_on(engine.reconcile("test", &remote)).unwrap();

        prop_assert_eq!(first, ReconciliationOutcome::Created);
        prop_assert_eq!(second, ReconciliationOutcome::Unchanged);
    }
}
