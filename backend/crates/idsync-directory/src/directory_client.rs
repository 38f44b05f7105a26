use crate::DirectoryResult;

use idsync_core::{RemoteIdentity, normalize_email};

use async_trait::async_trait;

/// Source of remote identities.
///
/// An empty directory is a successful empty listing, never an error.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn fetch_all(&self) -> DirectoryResult<Vec<RemoteIdentity>>;

    async fn fetch_one(&self, email: &str) -> DirectoryResult<Option<RemoteIdentity>> {
        let wanted = normalize_email(email);
        let identities = self.fetch_all().await?;

        Ok(identities
            .into_iter()
            .find(|identity| identity.normalized_email().as_deref() == Some(wanted.as_str())))
    }
}
