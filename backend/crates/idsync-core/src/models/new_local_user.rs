use crate::{TuningParameters, normalize_email};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Field set for inserting a local user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocalUser {
    pub email: String,
    pub name: String,
    pub external_id: Option<String>,
    /// Never used for authentication; the column only has to be non-empty.
    pub password_placeholder: String,
    pub current_account_id: Option<Uuid>,
    pub tuning: TuningParameters,
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl NewLocalUser {
    pub fn new(email: &str, name: impl Into<String>, password_placeholder: String) -> Self {
        Self {
            email: normalize_email(email),
            name: name.into(),
            external_id: None,
            password_placeholder,
            current_account_id: None,
            tuning: TuningParameters::default(),
            email_verified_at: None,
        }
    }
}
