#![allow(dead_code)]

use idsync_engine::{ReconciliationEngine, SqliteCatalog, SqliteUserStore};

use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    idsync_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn sqlite_engine(pool: &SqlitePool) -> ReconciliationEngine {
    ReconciliationEngine::new(
        Arc::new(SqliteUserStore::new(pool.clone())),
        Arc::new(SqliteCatalog::new(pool.clone(), "Default")),
    )
}
