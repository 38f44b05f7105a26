use crate::repositories::row_mapping::{USER_COLUMNS, map_user};
use crate::{DbError, Result as DbErrorResult};

use idsync_core::{ErrorLocation, LocalUser, NewLocalUser, SyncStatus, normalize_email};

use std::panic::Location;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<LocalUser>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<LocalUser>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user).transpose()
    }

    pub async fn find_by_external_id(&self, external_id: &str) -> DbErrorResult<Option<LocalUser>> {
        let sql = format!("SELECT {} FROM users WHERE external_id = ?", USER_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// Insert a user and, when a current account is given, its membership in
    /// that account. Both rows commit together.
    ///
    /// Unique-constraint races surface as [`DbError::DuplicateEmail`] or
    /// [`DbError::DuplicateExternalId`].
    pub async fn create(&self, new_user: &NewLocalUser) -> DbErrorResult<LocalUser> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let email = normalize_email(&new_user.email);
        let now = Utc::now().timestamp();
        let current_account_id = new_user.current_account_id.map(|a| a.to_string());
        let email_verified_at = new_user.email_verified_at.map(|at| at.timestamp());
        let tuning = &new_user.tuning;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
              INSERT INTO users (
                  id, email, name, external_id, password, current_account_id,
                  min_endpointing_delay, max_endpointing_delay, min_speech_duration,
                  min_silence_duration, prefix_padding_duration, max_buffered_speech,
                  activation_threshold, email_verified_at, created_at, updated_at
              )
              VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(&id_str)
        .bind(&email)
        .bind(&new_user.name)
        .bind(&new_user.external_id)
        .bind(&new_user.password_placeholder)
        .bind(&current_account_id)
        .bind(tuning.min_endpointing_delay)
        .bind(tuning.max_endpointing_delay)
        .bind(tuning.min_speech_duration)
        .bind(tuning.min_silence_duration)
        .bind(tuning.prefix_padding_duration)
        .bind(tuning.max_buffered_speech)
        .bind(tuning.activation_threshold)
        .bind(email_verified_at)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify_unique_violation(e, &email, new_user.external_id.as_deref()))?;

        if let Some(ref account_id) = current_account_id {
            sqlx::query(
                r#"
                  INSERT INTO account_memberships (user_id, account_id, created_at)
                  VALUES (?, ?, ?)
                  ON CONFLICT(user_id, account_id) DO NOTHING
                  "#,
            )
            .bind(&id_str)
            .bind(account_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| DbError::Initialization {
            message: format!("User {} missing after insert", id),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Fill a missing external id. A column that is already set is never
    /// overwritten; the returned row shows whatever is stored afterwards.
    pub async fn update_external_id(
        &self,
        user_id: Uuid,
        external_id: &str,
    ) -> DbErrorResult<LocalUser> {
        let id_str = user_id.to_string();
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
              UPDATE users
              SET external_id = ?, updated_at = ?
              WHERE id = ? AND external_id IS NULL
              "#,
        )
        .bind(external_id)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_unique_violation(e, "", Some(external_id)))?;

        if result.rows_affected() == 0 {
            log::debug!(
                "External id for user {} was already set, leaving it untouched",
                user_id
            );
        }

        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| DbError::Sqlx {
                source: sqlx::Error::RowNotFound,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn count_all(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_linked(&self) -> DbErrorResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE external_id IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn sync_status(&self) -> DbErrorResult<SyncStatus> {
        let total = self.count_all().await?;
        let linked = self.count_linked().await?;

        Ok(SyncStatus::new(total, linked))
    }
}

#[track_caller]
fn classify_unique_violation(source: sqlx::Error, email: &str, external_id: Option<&str>) -> DbError {
    #[allow(clippy::collapsible_if)]
    if let sqlx::Error::Database(ref db_err) = source {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("users.email") {
                return DbError::DuplicateEmail {
                    email: email.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                };
            }
            if message.contains("users.external_id") {
                return DbError::DuplicateExternalId {
                    external_id: external_id.unwrap_or_default().to_string(),
                    location: ErrorLocation::from(Location::caller()),
                };
            }
        }
    }

    DbError::from(source)
}
