use crate::{SyncLock, SyncResult};

use idsync_db::SyncLockRepository;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSyncLock {
    locks: SyncLockRepository,
}

impl SqliteSyncLock {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            locks: SyncLockRepository::new(pool),
        }
    }
}

#[async_trait]
impl SyncLock for SqliteSyncLock {
    async fn try_acquire(&self, name: &str, owner: &str, ttl: Duration) -> SyncResult<bool> {
        Ok(self.locks.try_acquire(name, owner, ttl_secs(ttl)).await?)
    }

    async fn renew(&self, name: &str, owner: &str, ttl: Duration) -> SyncResult<bool> {
        Ok(self.locks.renew(name, owner, ttl_secs(ttl)).await?)
    }

    async fn release(&self, name: &str, owner: &str) -> SyncResult<()> {
        if !self.locks.release(name, owner).await? {
            log::warn!("Lock '{}' was no longer held by {}", name, owner);
        }
        Ok(())
    }

    async fn holder(&self, name: &str) -> SyncResult<Option<String>> {
        Ok(self.locks.holder(name).await?)
    }
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}
