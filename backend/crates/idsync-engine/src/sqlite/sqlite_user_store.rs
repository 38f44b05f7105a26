use crate::{LocalUserStore, SyncResult};

use idsync_core::{Account, LocalUser, NewLocalUser, Role, RoleAssignment, SyncStatus};
use idsync_db::{RoleAssignmentRepository, UserRepository};

use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUserStore {
    users: UserRepository,
    assignments: RoleAssignmentRepository,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            assignments: RoleAssignmentRepository::new(pool),
        }
    }
}

#[async_trait]
impl LocalUserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> SyncResult<Option<LocalUser>> {
        Ok(self.users.find_by_email(email).await?)
    }

    async fn find_by_external_id(&self, external_id: &str) -> SyncResult<Option<LocalUser>> {
        Ok(self.users.find_by_external_id(external_id).await?)
    }

    async fn create(&self, new_user: &NewLocalUser) -> SyncResult<LocalUser> {
        Ok(self.users.create(new_user).await?)
    }

    async fn update_external_id(
        &self,
        user: &LocalUser,
        external_id: &str,
    ) -> SyncResult<LocalUser> {
        Ok(self.users.update_external_id(user.id, external_id).await?)
    }

    async fn attach_role(
        &self,
        user: &LocalUser,
        role: &Role,
        account: &Account,
    ) -> SyncResult<bool> {
        Ok(self.assignments.attach(user.id, role.id, account.id).await?)
    }

    async fn role_assignments(&self, user: &LocalUser) -> SyncResult<Vec<RoleAssignment>> {
        Ok(self.assignments.find_by_user(user.id).await?)
    }

    async fn sync_status(&self) -> SyncResult<SyncStatus> {
        Ok(self.users.sync_status().await?)
    }
}
