pub mod email;
pub mod error;
pub mod models;
pub mod sync;

#[cfg(test)]
mod tests;

pub use email::normalize_email;
pub use error::{CoreError, Result as CoreResult};
pub use error_location::ErrorLocation;
pub use models::account::Account;
pub use models::local_user::LocalUser;
pub use models::new_local_user::NewLocalUser;
pub use models::remote_identity::RemoteIdentity;
pub use models::role::Role;
pub use models::role_assignment::RoleAssignment;
pub use models::role_name::RoleName;
pub use models::sync_status::SyncStatus;
pub use models::tuning_parameters::TuningParameters;
pub use sync::identity_conflict::IdentityConflict;
pub use sync::reconciliation_outcome::ReconciliationOutcome;
pub use sync::skip_reason::SkipReason;
pub use sync::sync_summary::SyncSummary;
