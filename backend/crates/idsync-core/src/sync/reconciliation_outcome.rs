use crate::SkipReason;

use serde::Serialize;

/// Result of reconciling one remote identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    Created,
    Updated,
    Unchanged,
    Skipped(SkipReason),
}

impl ReconciliationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Skipped(_) => "skipped",
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}
