use crate::SyncResult;

use std::time::Duration;

use async_trait::async_trait;

/// A named lease shared by every process using the same store.
#[async_trait]
pub trait SyncLock: Send + Sync {
    /// Claim `name` for `owner` for `ttl`. Returns `false` while another
    /// owner holds an unexpired lease.
    async fn try_acquire(&self, name: &str, owner: &str, ttl: Duration) -> SyncResult<bool>;

    /// Extend a lease `owner` still holds to `ttl` from now. Returns `false`
    /// once another owner has taken it over or it was released.
    async fn renew(&self, name: &str, owner: &str, ttl: Duration) -> SyncResult<bool>;

    async fn release(&self, name: &str, owner: &str) -> SyncResult<()>;

    /// Current holder of `name`, if any.
    async fn holder(&self, name: &str) -> SyncResult<Option<String>>;
}
