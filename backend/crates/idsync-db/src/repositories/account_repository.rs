use crate::Result as DbErrorResult;
use crate::repositories::row_mapping::parse_uuid;

use idsync_core::Account;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Case-insensitive lookup by account name.
    pub async fn find_by_name(&self, name: &str) -> DbErrorResult<Option<Account>> {
        let row = sqlx::query("SELECT id, name, is_default FROM accounts WHERE name = ?")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_account).transpose()
    }

    /// The account flagged as default by the seed data, if any.
    pub async fn find_default(&self) -> DbErrorResult<Option<Account>> {
        let row = sqlx::query("SELECT id, name, is_default FROM accounts WHERE is_default = 1")
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_account).transpose()
    }
}

fn map_account(row: &SqliteRow) -> DbErrorResult<Account> {
    let id: String = row.try_get("id")?;
    Ok(Account {
        id: parse_uuid("accounts", "id", &id)?,
        name: row.try_get("name")?,
        is_default: row.try_get("is_default")?,
    })
}
