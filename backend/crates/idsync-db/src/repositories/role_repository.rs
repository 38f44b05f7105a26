use crate::Result as DbErrorResult;
use crate::repositories::row_mapping::parse_uuid;

use idsync_core::Role;

use sqlx::{Row, SqlitePool};

pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Case-insensitive lookup by role name.
    pub async fn find_by_name(&self, name: &str) -> DbErrorResult<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE name = ?")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| -> DbErrorResult<Role> {
            let id: String = r.try_get("id")?;
            Ok(Role {
                id: parse_uuid("roles", "id", &id)?,
                name: r.try_get("name")?,
            })
        })
        .transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Role>> {
        let rows = sqlx::query("SELECT id, name FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| -> DbErrorResult<Role> {
                let id: String = r.try_get("id")?;
                Ok(Role {
                    id: parse_uuid("roles", "id", &id)?,
                    name: r.try_get("name")?,
                })
            })
            .collect::<DbErrorResult<Vec<_>>>()
    }
}
