//! [`LocalUserStore`](crate::LocalUserStore), [`RoleAccountCatalog`](crate::RoleAccountCatalog)
//! and [`SyncLock`](crate::SyncLock) backed by the `idsync-db` repositories.

mod sqlite_catalog;
mod sqlite_sync_lock;
mod sqlite_user_store;

pub use sqlite_catalog::SqliteCatalog;
pub use sqlite_sync_lock::SqliteSyncLock;
pub use sqlite_user_store::SqliteUserStore;
