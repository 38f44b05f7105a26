use crate::{DbError, Result as DbErrorResult};

use idsync_core::{LocalUser, TuningParameters};

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub(crate) const USER_COLUMNS: &str = r#"
    id, email, name, external_id, current_account_id,
    min_endpointing_delay, max_endpointing_delay, min_speech_duration,
    min_silence_duration, prefix_padding_duration, max_buffered_speech,
    activation_threshold, email_verified_at, created_at, updated_at
"#;

#[track_caller]
pub(crate) fn parse_uuid(table: &'static str, field: &str, value: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        DbError::corrupt_row(table, format!("Invalid UUID in {}.{}: {}", table, field, e))
    })
}

#[track_caller]
pub(crate) fn parse_timestamp(
    table: &'static str,
    field: &str,
    secs: i64,
) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        DbError::corrupt_row(table, format!("Invalid timestamp in {}.{}", table, field))
    })
}

pub(crate) fn map_user(row: &SqliteRow) -> DbErrorResult<LocalUser> {
    let id: String = row.try_get("id")?;
    let current_account_id: Option<String> = row.try_get("current_account_id")?;
    let email_verified_at: Option<i64> = row.try_get("email_verified_at")?;

    Ok(LocalUser {
        id: parse_uuid("users", "id", &id)?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        external_id: row.try_get("external_id")?,
        current_account_id: current_account_id
            .map(|value| parse_uuid("users", "current_account_id", &value))
            .transpose()?,
        tuning: TuningParameters {
            min_endpointing_delay: row.try_get("min_endpointing_delay")?,
            max_endpointing_delay: row.try_get("max_endpointing_delay")?,
            min_speech_duration: row.try_get("min_speech_duration")?,
            min_silence_duration: row.try_get("min_silence_duration")?,
            prefix_padding_duration: row.try_get("prefix_padding_duration")?,
            max_buffered_speech: row.try_get("max_buffered_speech")?,
            activation_threshold: row.try_get("activation_threshold")?,
        },
        email_verified_at: email_verified_at
            .map(|secs| parse_timestamp("users", "email_verified_at", secs))
            .transpose()?,
        created_at: parse_timestamp("users", "created_at", row.try_get("created_at")?)?,
        updated_at: parse_timestamp("users", "updated_at", row.try_get("updated_at")?)?,
    })
}
