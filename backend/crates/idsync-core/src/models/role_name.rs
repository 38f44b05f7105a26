use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// The reference roles seeded into every environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    #[default]
    NormalUser,
    Caregiver,
    Organization,
    Admin,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::NormalUser,
        RoleName::Caregiver,
        RoleName::Organization,
        RoleName::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NormalUser => "Normal User",
            Self::Caregiver => "Caregiver",
            Self::Organization => "Organization",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        RoleName::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidRoleName {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
