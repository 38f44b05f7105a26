use crate::SyncResult;

use idsync_core::{Account, LocalUser, NewLocalUser, Role, RoleAssignment, SyncStatus};

use async_trait::async_trait;

/// Persistence port for local users and their role linkage.
///
/// Implementations must back email and external-id uniqueness with the
/// storage itself, so concurrent writers observe
/// [`SyncError::DuplicateEmail`](crate::SyncError::DuplicateEmail) and
/// [`SyncError::DuplicateExternalId`](crate::SyncError::DuplicateExternalId)
/// instead of creating duplicates.
#[async_trait]
pub trait LocalUserStore: Send + Sync {
    /// Lookup by email; the email is normalized before comparison.
    async fn find_by_email(&self, email: &str) -> SyncResult<Option<LocalUser>>;

    async fn find_by_external_id(&self, external_id: &str) -> SyncResult<Option<LocalUser>>;

    /// Insert a user, making `current_account_id` (when set) a membership.
    async fn create(&self, new_user: &NewLocalUser) -> SyncResult<LocalUser>;

    /// Fill the external id of a user that has none. Never overwrites an
    /// existing value; returns the row as stored afterwards.
    async fn update_external_id(
        &self,
        user: &LocalUser,
        external_id: &str,
    ) -> SyncResult<LocalUser>;

    /// Attach a (role, account) pair. Attaching an existing pair is a no-op
    /// and returns `false`.
    async fn attach_role(&self, user: &LocalUser, role: &Role, account: &Account)
    -> SyncResult<bool>;

    async fn role_assignments(&self, user: &LocalUser) -> SyncResult<Vec<RoleAssignment>>;

    async fn sync_status(&self) -> SyncResult<SyncStatus>;
}
