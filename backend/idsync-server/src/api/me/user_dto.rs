use idsync_core::{LocalUser, RoleAssignment, TuningParameters};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub external_id: Option<String>,
    pub current_account_id: Option<String>,
    pub tuning: TuningParameters,
    pub email_verified_at: Option<i64>,
    pub roles: Vec<RoleAssignmentDto>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignmentDto {
    pub role_id: String,
    pub account_id: String,
}

impl UserDto {
    pub fn new(user: LocalUser, assignments: Vec<RoleAssignment>) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            external_id: user.external_id,
            current_account_id: user.current_account_id.map(|id| id.to_string()),
            tuning: user.tuning,
            email_verified_at: user.email_verified_at.map(|at| at.timestamp()),
            roles: assignments
                .into_iter()
                .map(|a| RoleAssignmentDto {
                    role_id: a.role_id.to_string(),
                    account_id: a.account_id.to_string(),
                })
                .collect(),
            created_at: user.created_at.timestamp(),
            updated_at: user.updated_at.timestamp(),
        }
    }
}
