use idsync_db::DbError;
use idsync_directory::DirectoryError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Directory unavailable: {message} {location}")]
    DirectoryUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Directory authentication failed: {message} {location}")]
    DirectoryAuth {
        message: String,
        location: ErrorLocation,
    },

    #[error("A local user with email {email} already exists {location}")]
    DuplicateEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("External id {external_id} is already claimed {location}")]
    DuplicateExternalId {
        external_id: String,
        location: ErrorLocation,
    },

    #[error("Reference data not seeded: {what} {location}")]
    CatalogNotSeeded {
        what: String,
        location: ErrorLocation,
    },

    #[error("Batch sync already running (holder: {holder}) {location}")]
    BatchInProgress {
        holder: String,
        location: ErrorLocation,
    },

    #[error("Lease on {name} was lost mid-run {location}")]
    LeaseLost {
        name: String,
        location: ErrorLocation,
    },

    #[error("Store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

impl SyncError {
    #[track_caller]
    pub fn directory_unavailable(message: impl Into<String>) -> Self {
        Self::DirectoryUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn catalog_not_seeded(what: impl Into<String>) -> Self {
        Self::CatalogNotSeeded {
            what: what.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn batch_in_progress(holder: impl Into<String>) -> Self {
        Self::BatchInProgress {
            holder: holder.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn lease_lost(name: impl Into<String>) -> Self {
        Self::LeaseLost {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Only an unreachable directory is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DirectoryUnavailable { .. })
    }

    /// Errors that end a whole batch rather than a single record.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CatalogNotSeeded { .. } | Self::DirectoryAuth { .. }
        )
    }

    /// Short machine-readable label, used for metrics and API error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DirectoryUnavailable { .. } => "directory_unavailable",
            Self::DirectoryAuth { .. } => "directory_auth",
            Self::DuplicateEmail { .. } => "duplicate_email",
            Self::DuplicateExternalId { .. } => "duplicate_external_id",
            Self::CatalogNotSeeded { .. } => "catalog_not_seeded",
            Self::BatchInProgress { .. } => "batch_in_progress",
            Self::LeaseLost { .. } => "lease_lost",
            Self::Store { .. } => "store",
        }
    }
}

impl From<DbError> for SyncError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            DbError::DuplicateEmail { email, .. } => Self::DuplicateEmail { email, location },
            DbError::DuplicateExternalId { external_id, .. } => Self::DuplicateExternalId {
                external_id,
                location,
            },
            other => Self::Store {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<DirectoryError> for SyncError {
    #[track_caller]
    fn from(err: DirectoryError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            DirectoryError::Unavailable { message, .. } => {
                Self::DirectoryUnavailable { message, location }
            }
            DirectoryError::Auth { message, .. } => Self::DirectoryAuth { message, location },
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
