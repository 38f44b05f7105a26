use serde::Serialize;

/// How much of the local user table is linked to the remote directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncStatus {
    pub total_users: i64,
    pub linked_users: i64,
    pub sync_percentage: f64,
}

impl SyncStatus {
    pub fn new(total_users: i64, linked_users: i64) -> Self {
        let sync_percentage = if total_users > 0 {
            let raw = linked_users as f64 / total_users as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            total_users,
            linked_users,
            sync_percentage,
        }
    }
}
