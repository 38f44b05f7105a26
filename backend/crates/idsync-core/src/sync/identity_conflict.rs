use serde::Serialize;
use uuid::Uuid;

/// A remote identity that could not be linked because a local user already
/// holds a different linkage. Left for an operator to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityConflict {
    /// Email carried by the remote record.
    pub email: String,
    pub remote_external_id: String,
    /// The local user that blocks the linkage.
    pub local_user_id: Uuid,
    pub local_email: String,
    pub local_external_id: Option<String>,
}
