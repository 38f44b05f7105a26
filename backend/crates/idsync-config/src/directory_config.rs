use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:54321";
pub const DEFAULT_USERS_PATH: &str = "/auth/v1/admin/users";

pub const MIN_PER_PAGE: u32 = 1;
pub const MAX_PER_PAGE: u32 = 1000;
pub const DEFAULT_PER_PAGE: u32 = 50;

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to reach the identity provider's admin user listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub users_path: String,
    /// Static service key. Missing is reported at fetch time, not here.
    pub api_key: Option<String>,
    pub per_page: u32,
    pub timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            users_path: String::from(DEFAULT_USERS_PATH),
            api_key: None,
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DirectoryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::directory(format!(
                "directory.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if !self.users_path.starts_with('/') {
            return Err(ConfigError::directory(format!(
                "directory.users_path must start with '/', got '{}'",
                self.users_path
            )));
        }

        if self.per_page < MIN_PER_PAGE || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::directory(format!(
                "directory.per_page must be {}-{}, got {}",
                MIN_PER_PAGE, MAX_PER_PAGE, self.per_page
            )));
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::directory(format!(
                "directory.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
