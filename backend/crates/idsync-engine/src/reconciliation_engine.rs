use crate::{LocalUserStore, Metrics, RoleAccountCatalog, SyncError, SyncResult};

use idsync_core::{
    IdentityConflict, LocalUser, NewLocalUser, ReconciliationOutcome, RemoteIdentity, SkipReason,
    SyncSummary,
};

use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;

const PASSWORD_PLACEHOLDER_LEN: usize = 40;

/// Applies one remote identity at a time to the local store.
///
/// Holds no locks and no state between calls; atomicity comes from the
/// store's unique constraints. Every rule here is idempotent, so a pass can
/// be repeated or interrupted at any point.
pub struct ReconciliationEngine {
    store: Arc<dyn LocalUserStore>,
    catalog: Arc<dyn RoleAccountCatalog>,
    metrics: Metrics,
}

impl ReconciliationEngine {
    pub fn new(store: Arc<dyn LocalUserStore>, catalog: Arc<dyn RoleAccountCatalog>) -> Self {
        Self {
            store,
            catalog,
            metrics: Metrics::new(),
        }
    }

    /// Reconcile a single identity. `trigger` labels metrics and logs.
    pub async fn reconcile(
        &self,
        trigger: &str,
        remote: &RemoteIdentity,
    ) -> SyncResult<ReconciliationOutcome> {
        let result = self.reconcile_inner(remote).await;

        match &result {
            Ok(outcome) => self.metrics.outcome_recorded(trigger, outcome),
            Err(e) => self.metrics.reconcile_failed(trigger, e.kind()),
        }

        result
    }

    /// Reconcile every identity in order.
    ///
    /// A failing record is logged and counted, then the pass moves on. Only
    /// a fatal error (missing reference data) stops the pass.
    pub async fn reconcile_batch(
        &self,
        trigger: &str,
        identities: &[RemoteIdentity],
    ) -> SyncResult<SyncSummary> {
        let mut summary = SyncSummary::default();

        for remote in identities {
            match self.reconcile(trigger, remote).await {
                Ok(outcome) => summary.record(&outcome),
                Err(e) if e.is_fatal() => {
                    log::error!("Aborting {} pass: {}", trigger, e);
                    return Err(e);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to reconcile {}: {}",
                        remote.email.as_deref().unwrap_or("<no email>"),
                        e
                    );
                    summary.record_failure();
                }
            }
        }

        Ok(summary)
    }

    async fn reconcile_inner(&self, remote: &RemoteIdentity) -> SyncResult<ReconciliationOutcome> {
        let (Some(email), Some(external_id)) = (remote.normalized_email(), remote.external_id())
        else {
            log::debug!("Skipping remote identity without email or external id");
            return Ok(ReconciliationOutcome::Skipped(SkipReason::MissingFields));
        };

        match self.store.find_by_email(&email).await? {
            Some(user) => self.reconcile_existing(remote, user, &email, external_id).await,
            None => self.create_linked(remote, &email, external_id).await,
        }
    }

    async fn create_linked(
        &self,
        remote: &RemoteIdentity,
        email: &str,
        external_id: &str,
    ) -> SyncResult<ReconciliationOutcome> {
        if let Some(holder) = self.store.find_by_external_id(external_id).await? {
            return Ok(conflict(email, external_id, &holder));
        }

        let role = self.catalog.resolve_role(remote.role_name()).await?;
        let account = self.catalog.resolve_account(remote.role_name()).await?;

        let mut new_user =
            NewLocalUser::new(email, remote.display_name(), password_placeholder());
        new_user.external_id = Some(external_id.to_string());
        new_user.current_account_id = Some(account.id);
        new_user.tuning = remote.tuning();
        new_user.email_verified_at = remote.email_confirmed_at;

        let user = match self.store.create(&new_user).await {
            Ok(user) => user,
            Err(SyncError::DuplicateEmail { .. }) => {
                log::debug!("{} was created concurrently, re-reading", email);
                let user = self.store.find_by_email(email).await?.ok_or_else(|| {
                    SyncError::store(format!("{} reported as duplicate but not found", email))
                })?;
                return self.reconcile_existing(remote, user, email, external_id).await;
            }
            Err(SyncError::DuplicateExternalId { .. }) => {
                return match self.store.find_by_external_id(external_id).await? {
                    Some(holder) => Ok(conflict(email, external_id, &holder)),
                    None => Err(SyncError::store(format!(
                        "external id {} reported as claimed but not found",
                        external_id
                    ))),
                };
            }
            Err(e) => return Err(e),
        };

        self.store.attach_role(&user, &role, &account).await?;

        log::info!(
            "Created local user {} ({}) as {} in {}",
            user.email,
            user.id,
            role.name,
            account.name
        );

        Ok(ReconciliationOutcome::Created)
    }

    async fn reconcile_existing(
        &self,
        remote: &RemoteIdentity,
        user: LocalUser,
        email: &str,
        external_id: &str,
    ) -> SyncResult<ReconciliationOutcome> {
        match user.external_id.as_deref() {
            None => self.link(remote, user, email, external_id).await,
            Some(stored) if stored == external_id => {
                if self.repair_role_linkage(remote, &user).await? {
                    Ok(ReconciliationOutcome::Updated)
                } else {
                    Ok(ReconciliationOutcome::Unchanged)
                }
            }
            Some(_) => Ok(conflict(email, external_id, &user)),
        }
    }

    async fn link(
        &self,
        remote: &RemoteIdentity,
        user: LocalUser,
        email: &str,
        external_id: &str,
    ) -> SyncResult<ReconciliationOutcome> {
        if let Some(holder) = self.store.find_by_external_id(external_id).await?
            && holder.id != user.id
        {
            return Ok(conflict(email, external_id, &holder));
        }

        let linked = match self.store.update_external_id(&user, external_id).await {
            Ok(linked) => linked,
            Err(SyncError::DuplicateExternalId { .. }) => {
                return match self.store.find_by_external_id(external_id).await? {
                    Some(holder) => Ok(conflict(email, external_id, &holder)),
                    None => Err(SyncError::store(format!(
                        "external id {} reported as claimed but not found",
                        external_id
                    ))),
                };
            }
            Err(e) => return Err(e),
        };

        // Another writer filled the column first.
        if linked.external_id.as_deref() != Some(external_id) {
            return Ok(conflict(email, external_id, &linked));
        }

        self.repair_role_linkage(remote, &linked).await?;

        log::info!("Linked local user {} to external id {}", linked.email, external_id);

        Ok(ReconciliationOutcome::Updated)
    }

    /// Attach the resolved (role, account) pair to a user that has no role
    /// at all. Returns whether anything was attached.
    async fn repair_role_linkage(
        &self,
        remote: &RemoteIdentity,
        user: &LocalUser,
    ) -> SyncResult<bool> {
        if !self.store.role_assignments(user).await?.is_empty() {
            return Ok(false);
        }

        let role = self.catalog.resolve_role(remote.role_name()).await?;
        let account = self.catalog.resolve_account(remote.role_name()).await?;
        let attached = self.store.attach_role(user, &role, &account).await?;

        if attached {
            log::info!(
                "Attached missing role {} in {} to {}",
                role.name,
                account.name,
                user.email
            );
        }

        Ok(attached)
    }
}

fn conflict(email: &str, external_id: &str, holder: &LocalUser) -> ReconciliationOutcome {
    log::warn!(
        "External id conflict for {}: remote id {}, local user {} ({}) holds {}",
        email,
        external_id,
        holder.id,
        holder.email,
        holder.external_id.as_deref().unwrap_or("<none>")
    );

    ReconciliationOutcome::Skipped(SkipReason::ExternalIdConflict(IdentityConflict {
        email: email.to_string(),
        remote_external_id: external_id.to_string(),
        local_user_id: holder.id,
        local_email: holder.email.clone(),
        local_external_id: holder.external_id.clone(),
    }))
}

/// Random value for the local password column. Authentication is delegated
/// to the identity provider, so it is never checked.
fn password_placeholder() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_PLACEHOLDER_LEN)
        .map(char::from)
        .collect()
}
