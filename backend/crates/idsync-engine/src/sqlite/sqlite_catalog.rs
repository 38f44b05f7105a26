use crate::{RoleAccountCatalog, SyncError, SyncResult};

use idsync_core::{Account, Role, RoleName};
use idsync_db::{AccountRepository, RoleRepository};

use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCatalog {
    roles: RoleRepository,
    accounts: AccountRepository,
    default_account: String,
}

impl SqliteCatalog {
    /// `default_account` names the account unknown names fall back to.
    pub fn new(pool: SqlitePool, default_account: impl Into<String>) -> Self {
        Self {
            roles: RoleRepository::new(pool.clone()),
            accounts: AccountRepository::new(pool),
            default_account: default_account.into(),
        }
    }
}

#[async_trait]
impl RoleAccountCatalog for SqliteCatalog {
    async fn resolve_role(&self, name: Option<&str>) -> SyncResult<Role> {
        if let Some(name) = name {
            if let Some(role) = self.roles.find_by_name(name).await? {
                return Ok(role);
            }
            log::debug!("Unknown role '{}', using {}", name, RoleName::default());
        }

        let fallback = RoleName::default();
        self.roles
            .find_by_name(fallback.as_str())
            .await?
            .ok_or_else(|| SyncError::catalog_not_seeded(format!("role '{}'", fallback)))
    }

    async fn resolve_account(&self, name: Option<&str>) -> SyncResult<Account> {
        if let Some(name) = name
            && let Some(account) = self.accounts.find_by_name(name).await?
        {
            return Ok(account);
        }

        self.accounts
            .find_by_name(&self.default_account)
            .await?
            .ok_or_else(|| {
                SyncError::catalog_not_seeded(format!("account '{}'", self.default_account))
            })
    }
}
