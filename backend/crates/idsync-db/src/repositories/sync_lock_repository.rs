use crate::Result as DbErrorResult;

use chrono::Utc;
use sqlx::SqlitePool;

/// Named leases stored in `sync_locks`.
///
/// A lease is claimed with a single upsert, so two processes sharing the
/// database cannot both hold it. An expired lease may be taken over.
pub struct SyncLockRepository {
    pool: SqlitePool,
}

impl SyncLockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn try_acquire(&self, name: &str, owner: &str, ttl_secs: i64) -> DbErrorResult<bool> {
        let now = Utc::now().timestamp();
        let expires_at = now + ttl_secs;

        let result = sqlx::query(
            r#"
              INSERT INTO sync_locks (name, owner, acquired_at, expires_at)
              VALUES (?, ?, ?, ?)
              ON CONFLICT(name) DO UPDATE SET
                  owner = excluded.owner,
                  acquired_at = excluded.acquired_at,
                  expires_at = excluded.expires_at
              WHERE sync_locks.expires_at <= ?
              "#,
        )
        .bind(name)
        .bind(owner)
        .bind(now)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Push the expiry of a lease held by `owner` to `ttl_secs` from now.
    /// Returns `false` if the lease has been taken over or released.
    pub async fn renew(&self, name: &str, owner: &str, ttl_secs: i64) -> DbErrorResult<bool> {
        let expires_at = Utc::now().timestamp() + ttl_secs;

        let result =
            sqlx::query("UPDATE sync_locks SET expires_at = ? WHERE name = ? AND owner = ?")
                .bind(expires_at)
                .bind(name)
                .bind(owner)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Release a lease held by `owner`. Returns `false` if it was not held.
    pub async fn release(&self, name: &str, owner: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM sync_locks WHERE name = ? AND owner = ?")
            .bind(name)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn holder(&self, name: &str) -> DbErrorResult<Option<String>> {
        let owner = sqlx::query_scalar("SELECT owner FROM sync_locks WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner)
    }
}
