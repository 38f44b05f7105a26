use crate::ServerErrorResult;

use idsync_config::Config;
use idsync_directory::{DirectoryClient, HttpDirectoryClient};
use idsync_engine::{
    BatchSettings, BatchSync, LazySync, LocalUserStore, ReconciliationEngine, SqliteCatalog,
    SqliteSyncLock, SqliteUserStore,
};

use std::sync::Arc;

use sqlx::SqlitePool;

/// The reconciliation engine and its triggers, wired to one database.
#[derive(Clone)]
pub struct SyncServices {
    pub store: Arc<dyn LocalUserStore>,
    pub lazy: LazySync,
    pub batch: Arc<BatchSync>,
}

impl SyncServices {
    pub fn new(pool: &SqlitePool, config: &Config, directory: Arc<dyn DirectoryClient>) -> Self {
        let store: Arc<dyn LocalUserStore> = Arc::new(SqliteUserStore::new(pool.clone()));
        let catalog = Arc::new(SqliteCatalog::new(
            pool.clone(),
            config.sync.default_account.clone(),
        ));
        let engine = Arc::new(ReconciliationEngine::new(store.clone(), catalog));

        let batch = Arc::new(BatchSync::new(
            engine.clone(),
            directory,
            Arc::new(SqliteSyncLock::new(pool.clone())),
            BatchSettings::from_config(config),
        ));

        Self {
            store,
            lazy: LazySync::new(engine),
            batch,
        }
    }

    /// Wire the services against the configured HTTP directory.
    pub fn from_config(pool: &SqlitePool, config: &Config) -> ServerErrorResult<Self> {
        let directory = HttpDirectoryClient::new(&config.directory)?;
        log::info!(
            "Directory: {}{}",
            directory.base_url,
            directory.users_path
        );

        Ok(Self::new(pool, config, Arc::new(directory)))
    }
}
