//! Reconciliation of remote directory identities into the local user store.
//!
//! One [`ReconciliationEngine`] holds the per-record rules. Three thin
//! triggers feed it: [`LazySync`] for request assertions, [`BatchSync`] for
//! full directory passes (scheduled or on demand) and the seed binary, which
//! runs a single batch.

mod error;
mod local_user_store;
mod metrics;
mod reconciliation_engine;
mod retry;
mod role_account_catalog;
mod sqlite;
mod sync_lock;
mod triggers;

#[cfg(test)]
mod tests;

pub use error::{Result as SyncResult, SyncError};
pub use local_user_store::LocalUserStore;
pub use metrics::Metrics;
pub use reconciliation_engine::ReconciliationEngine;
pub use retry::{IsRetryable, with_retry};
pub use role_account_catalog::RoleAccountCatalog;
pub use sqlite::{SqliteCatalog, SqliteSyncLock, SqliteUserStore};
pub use sync_lock::SyncLock;
pub use triggers::batch_scheduler::BatchScheduler;
pub use triggers::batch_sync::{BATCH_LOCK_NAME, BatchSettings, BatchSync};
pub use triggers::identity_assertion::IdentityAssertion;
pub use triggers::lazy_sync::LazySync;
