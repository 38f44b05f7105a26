use crate::IdentityConflict;

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    MissingFields,
    ExternalIdConflict(IdentityConflict),
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing email or external id",
            Self::ExternalIdConflict(_) => "external id conflict",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
