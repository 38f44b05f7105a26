use crate::{TuningParameters, normalize_email};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FALLBACK_DISPLAY_NAME: &str = "User";

/// Read-only projection of one identity-provider record.
///
/// Built either from a directory listing or from a trusted request
/// assertion. Never persisted; consumed once per reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteIdentity {
    pub external_id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl RemoteIdentity {
    pub fn new(external_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            external_id: Some(external_id.into()),
            email: Some(email.into()),
            metadata: Map::new(),
            email_confirmed_at: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The external id, if present and not blank.
    pub fn external_id(&self) -> Option<&str> {
        self.external_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// The normalized email, if present and not blank.
    pub fn normalized_email(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
    }

    /// A non-blank string value from metadata.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn role_name(&self) -> Option<&str> {
        self.metadata_str("role")
    }

    /// `name`, then `display_name`, then a generic placeholder.
    pub fn display_name(&self) -> String {
        self.metadata_str("name")
            .or_else(|| self.metadata_str("display_name"))
            .unwrap_or(FALLBACK_DISPLAY_NAME)
            .to_string()
    }

    pub fn tuning(&self) -> TuningParameters {
        TuningParameters::from_metadata(&self.metadata)
    }
}
