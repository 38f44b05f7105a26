use crate::TuningParameters;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub external_id: Option<String>,
    pub current_account_id: Option<Uuid>,

    pub tuning: TuningParameters,

    pub email_verified_at: Option<DateTime<Utc>>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalUser {
    pub fn is_linked(&self) -> bool {
        self.external_id.is_some()
    }
}
