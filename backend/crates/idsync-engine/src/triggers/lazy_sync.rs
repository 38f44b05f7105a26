use crate::{IdentityAssertion, ReconciliationEngine};

use idsync_core::ReconciliationOutcome;

use std::sync::Arc;

const TRIGGER: &str = "lazy";

/// Reconciles the asserted identity inline on the request path.
///
/// Never fetches from the directory and never fails the request: errors
/// are logged and reported as `None`.
#[derive(Clone)]
pub struct LazySync {
    engine: Arc<ReconciliationEngine>,
}

impl LazySync {
    pub fn new(engine: Arc<ReconciliationEngine>) -> Self {
        Self { engine }
    }

    pub async fn on_request(&self, assertion: &IdentityAssertion) -> Option<ReconciliationOutcome> {
        let remote = assertion.to_remote_identity();

        match self.engine.reconcile(TRIGGER, &remote).await {
            Ok(outcome) => {
                if outcome.is_write() {
                    log::info!(
                        "Lazy sync {} {} ({})",
                        outcome.as_str(),
                        assertion.email,
                        assertion.external_id
                    );
                }
                Some(outcome)
            }
            Err(e) => {
                log::warn!("Lazy sync failed for {}: {}", assertion.email, e);
                None
            }
        }
    }
}
