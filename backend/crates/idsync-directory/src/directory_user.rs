use idsync_core::RemoteIdentity;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One user object as returned by the admin listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUser {
    pub id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

/// Some deployments return a bare array, others wrap it in `{"users": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserListPage {
    Bare(Vec<DirectoryUser>),
    Wrapped { users: Vec<DirectoryUser> },
}

impl UserListPage {
    pub(crate) fn into_users(self) -> Vec<DirectoryUser> {
        match self {
            UserListPage::Bare(users) | UserListPage::Wrapped { users } => users,
        }
    }
}

impl From<DirectoryUser> for RemoteIdentity {
    fn from(user: DirectoryUser) -> Self {
        let email_confirmed_at = user
            .email_confirmed_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        RemoteIdentity {
            external_id: user.id,
            email: user.email,
            metadata: user.user_metadata.unwrap_or_default(),
            email_confirmed_at,
        }
    }
}
