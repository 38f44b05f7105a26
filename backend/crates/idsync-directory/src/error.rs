use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Errors that can occur while listing remote users
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Unreachable, timed out, non-success status or undecodable body
    #[error("Directory unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Credentials missing from configuration or rejected by the provider
    #[error("Directory authentication failed: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },
}

impl DirectoryError {
    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        DirectoryError::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        DirectoryError::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, DirectoryError::Unavailable { .. })
    }
}

impl From<reqwest::Error> for DirectoryError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        DirectoryError::unavailable(format!("{}: {}", kind, err))
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
