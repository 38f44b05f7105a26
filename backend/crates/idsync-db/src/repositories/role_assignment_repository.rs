use crate::Result as DbErrorResult;
use crate::repositories::row_mapping::{parse_timestamp, parse_uuid};

use idsync_core::RoleAssignment;

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct RoleAssignmentRepository {
    pool: SqlitePool,
}

impl RoleAssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Grant `role_id` to `user_id` within `account_id`, adding the account
    /// membership as well. Returns `false` when the pair already existed.
    pub async fn attach(
        &self,
        user_id: Uuid,
        role_id: Uuid,
        account_id: Uuid,
    ) -> DbErrorResult<bool> {
        let user_id_str = user_id.to_string();
        let account_id_str = account_id.to_string();
        let now = Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
              INSERT INTO account_memberships (user_id, account_id, created_at)
              VALUES (?, ?, ?)
              ON CONFLICT(user_id, account_id) DO NOTHING
              "#,
        )
        .bind(&user_id_str)
        .bind(&account_id_str)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
              INSERT INTO role_assignments (user_id, role_id, account_id, created_at)
              VALUES (?, ?, ?, ?)
              ON CONFLICT(user_id, role_id, account_id) DO NOTHING
              "#,
        )
        .bind(&user_id_str)
        .bind(role_id.to_string())
        .bind(&account_id_str)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbErrorResult<Vec<RoleAssignment>> {
        let rows = sqlx::query(
            r#"
              SELECT user_id, role_id, account_id, created_at
              FROM role_assignments
              WHERE user_id = ?
              ORDER BY created_at
              "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| -> DbErrorResult<RoleAssignment> {
                let user_id: String = r.try_get("user_id")?;
                let role_id: String = r.try_get("role_id")?;
                let account_id: String = r.try_get("account_id")?;
                Ok(RoleAssignment {
                    user_id: parse_uuid("role_assignments", "user_id", &user_id)?,
                    role_id: parse_uuid("role_assignments", "role_id", &role_id)?,
                    account_id: parse_uuid("role_assignments", "account_id", &account_id)?,
                    created_at: parse_timestamp(
                        "role_assignments",
                        "created_at",
                        r.try_get("created_at")?,
                    )?,
                })
            })
            .collect::<DbErrorResult<Vec<_>>>()
    }
}
