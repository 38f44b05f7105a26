use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_SYNC_ENABLED: bool = true;

pub const MIN_INTERVAL_SECS: u64 = 10;
pub const MAX_INTERVAL_SECS: u64 = 86_400;
pub const DEFAULT_INTERVAL_SECS: u64 = 900;

pub const MIN_LOCK_TTL_SECS: u64 = 10;
pub const MAX_LOCK_TTL_SECS: u64 = 86_400;
pub const DEFAULT_LOCK_TTL_SECS: u64 = 600;

pub const MIN_FETCH_DEADLINE_SECS: u64 = 10;
pub const MAX_FETCH_DEADLINE_SECS: u64 = 86_400;
pub const DEFAULT_FETCH_DEADLINE_SECS: u64 = 600;

pub const DEFAULT_ACCOUNT_NAME: &str = "Default";

/// Scheduling and defaults for batch reconciliation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Run the recurring batch sync inside the server
    pub enabled: bool,
    pub interval_secs: u64,
    /// Lease length of the batch lock. A running batch keeps renewing it;
    /// a crashed run frees it after this
    pub lock_ttl_secs: u64,
    /// Upper bound on one complete paginated listing attempt
    pub fetch_deadline_secs: u64,
    /// Account used when a remote record names no known account
    pub default_account: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_SYNC_ENABLED,
            interval_secs: DEFAULT_INTERVAL_SECS,
            lock_ttl_secs: DEFAULT_LOCK_TTL_SECS,
            fetch_deadline_secs: DEFAULT_FETCH_DEADLINE_SECS,
            default_account: String::from(DEFAULT_ACCOUNT_NAME),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_secs < MIN_INTERVAL_SECS || self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ConfigError::sync(format!(
                "sync.interval_secs must be {}-{}, got {}",
                MIN_INTERVAL_SECS, MAX_INTERVAL_SECS, self.interval_secs
            )));
        }

        if self.lock_ttl_secs < MIN_LOCK_TTL_SECS || self.lock_ttl_secs > MAX_LOCK_TTL_SECS {
            return Err(ConfigError::sync(format!(
                "sync.lock_ttl_secs must be {}-{}, got {}",
                MIN_LOCK_TTL_SECS, MAX_LOCK_TTL_SECS, self.lock_ttl_secs
            )));
        }

        if self.fetch_deadline_secs < MIN_FETCH_DEADLINE_SECS
            || self.fetch_deadline_secs > MAX_FETCH_DEADLINE_SECS
        {
            return Err(ConfigError::sync(format!(
                "sync.fetch_deadline_secs must be {}-{}, got {}",
                MIN_FETCH_DEADLINE_SECS, MAX_FETCH_DEADLINE_SECS, self.fetch_deadline_secs
            )));
        }

        if self.default_account.trim().is_empty() {
            return Err(ConfigError::sync("sync.default_account cannot be empty"));
        }

        Ok(())
    }
}
