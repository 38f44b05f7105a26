use crate::SyncResult;

use idsync_core::{Account, Role};

use async_trait::async_trait;

/// Read-only lookup of pre-seeded roles and accounts.
///
/// Absent or unknown names resolve to the fallback (`Normal User` role,
/// configured default account). Only a missing fallback is an error.
#[async_trait]
pub trait RoleAccountCatalog: Send + Sync {
    async fn resolve_role(&self, name: Option<&str>) -> SyncResult<Role>;

    async fn resolve_account(&self, name: Option<&str>) -> SyncResult<Account>;
}
