use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, DirectoryConfig, LogLevel, LoggingConfig, RetryConfig, ServerConfig,
    SyncConfig,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub directory: DirectoryConfig,
    pub sync: SyncConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for IDSYNC_CONFIG_DIR env var, else use ./.idsync/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply IDSYNC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: IDSYNC_CONFIG_DIR env var > ./.idsync/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.directory.validate()?;
        self.sync.validate()?;
        self.retry.validate()?;

        // A listing must have room for at least one full page request
        if self.sync.fetch_deadline_secs < self.directory.timeout_secs {
            return Err(ConfigError::sync(format!(
                "sync.fetch_deadline_secs ({}) must be at least directory.timeout_secs ({})",
                self.sync.fetch_deadline_secs, self.directory.timeout_secs
            )));
        }

        // The batch lease must outlive one stalled directory request
        if self.sync.lock_ttl_secs < self.directory.timeout_secs {
            return Err(ConfigError::sync(format!(
                "sync.lock_ttl_secs ({}) must be at least directory.timeout_secs ({})",
                self.sync.lock_ttl_secs, self.directory.timeout_secs
            )));
        }

        // Database path must stay inside the config dir
        let db_path = Path::new(&self.database.path);
        if self.database.path.trim().is_empty()
            || db_path.is_absolute()
            || self.database.path.contains("..")
        {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  directory: {}{} (api key {}, per_page={}, timeout={}s)",
            self.directory.base_url,
            self.directory.users_path,
            if self.directory.has_api_key() {
                "set"
            } else {
                "MISSING"
            },
            self.directory.per_page,
            self.directory.timeout_secs
        );
        info!(
            "  sync: {} (interval={}s, lock_ttl={}s, fetch_deadline={}s, default_account='{}')",
            if self.sync.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.sync.interval_secs,
            self.sync.lock_ttl_secs,
            self.sync.fetch_deadline_secs,
            self.sync.default_account
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("IDSYNC_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDSYNC_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("IDSYNC_DATABASE_PATH", &mut self.database.path);

        // Directory
        Self::apply_env_string("IDSYNC_DIRECTORY_BASE_URL", &mut self.directory.base_url);
        Self::apply_env_string(
            "IDSYNC_DIRECTORY_USERS_PATH",
            &mut self.directory.users_path,
        );
        Self::apply_env_option_string("IDSYNC_DIRECTORY_API_KEY", &mut self.directory.api_key);
        Self::apply_env_parse("IDSYNC_DIRECTORY_PER_PAGE", &mut self.directory.per_page);
        Self::apply_env_parse(
            "IDSYNC_DIRECTORY_TIMEOUT_SECS",
            &mut self.directory.timeout_secs,
        );

        // Sync
        Self::apply_env_bool("IDSYNC_SYNC_ENABLED", &mut self.sync.enabled);
        Self::apply_env_parse("IDSYNC_SYNC_INTERVAL_SECS", &mut self.sync.interval_secs);
        Self::apply_env_parse("IDSYNC_SYNC_LOCK_TTL_SECS", &mut self.sync.lock_ttl_secs);
        Self::apply_env_parse(
            "IDSYNC_SYNC_FETCH_DEADLINE_SECS",
            &mut self.sync.fetch_deadline_secs,
        );
        Self::apply_env_string(
            "IDSYNC_SYNC_DEFAULT_ACCOUNT",
            &mut self.sync.default_account,
        );

        // Retry
        Self::apply_env_parse("IDSYNC_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "IDSYNC_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse(
            "IDSYNC_RETRY_MAX_DELAY_SECS",
            &mut self.retry.max_delay_secs,
        );
        Self::apply_env_parse(
            "IDSYNC_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("IDSYNC_RETRY_JITTER", &mut self.retry.jitter);

        // Logging
        if let Ok(level) = std::env::var("IDSYNC_LOG_LEVEL") {
            self.logging.level = LogLevel::parse_lenient(&level);
        }
        Self::apply_env_bool("IDSYNC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDSYNC_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(key: &str, target: &mut String) {
        if let Ok(value) = std::env::var(key) {
            *target = value;
        }
    }

    fn apply_env_option_string(key: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(key) {
            *target = if value.is_empty() { None } else { Some(value) };
        }
    }

    fn apply_env_parse<T: FromStr>(key: &str, target: &mut T) {
        #[allow(clippy::collapsible_if)]
        if let Ok(value) = std::env::var(key) {
            if let Ok(parsed) = value.parse() {
                *target = parsed;
            } else {
                log::warn!("Ignoring unparseable value for {}: {}", key, value);
            }
        }
    }

    fn apply_env_bool(key: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(key) {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => *target = true,
                "0" | "false" | "no" | "off" => *target = false,
                _ => log::warn!("Ignoring unparseable boolean for {}: {}", key, value),
            }
        }
    }
}
