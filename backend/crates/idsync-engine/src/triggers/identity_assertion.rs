use idsync_core::RemoteIdentity;

/// Identity asserted by a trusted upstream (an authentication proxy) for
/// the current request. Not verified here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAssertion {
    pub external_id: String,
    pub email: String,
}

impl IdentityAssertion {
    /// Build an assertion from raw header values. Blank values yield `None`.
    pub fn from_parts(external_id: Option<&str>, email: Option<&str>) -> Option<Self> {
        let external_id = external_id.map(str::trim).filter(|v| !v.is_empty())?;
        let email = email.map(str::trim).filter(|v| !v.is_empty())?;

        Some(Self {
            external_id: external_id.to_string(),
            email: email.to_string(),
        })
    }

    /// An assertion carries no profile metadata, so every field derived
    /// from it takes its default.
    pub fn to_remote_identity(&self) -> RemoteIdentity {
        RemoteIdentity::new(self.external_id.clone(), self.email.clone())
    }
}
