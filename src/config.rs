//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::service::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address on which to start the HTTP server
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:1412".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Admin API credentials
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Username → password
    #[serde(default)]
    pub users: HashMap<String, String>,
}

/// Startup CSV import
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// CSV file to load into the store after starting
    pub csv_file: Option<PathBuf>,

    /// Skip the first record of the file
    #[serde(default = "default_has_header")]
    pub has_header: bool,
}

fn default_has_header() -> bool {
    true
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_file: None,
            has_header: default_has_header(),
        }
    }
}

/// List page sizes
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PaginationConfig {
    pub fn limits(&self) -> PageLimits {
        PageLimits {
            default_size: self.default_page_size,
            max_size: self.max_page_size,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("postboard").join("config.toml")),
            Some(PathBuf::from("/etc/postboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    ///
    /// `POSTBOARD_ADMIN_USER` adds a user (with `POSTBOARD_ADMIN_PASSWORD`,
    /// empty if unset) on top of the configured ones.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(listen) = std::env::var("POSTBOARD_LISTEN") {
            self.server.listen = listen;
        }

        if let Ok(user) = std::env::var("POSTBOARD_ADMIN_USER") {
            let password = std::env::var("POSTBOARD_ADMIN_PASSWORD").unwrap_or_default();
            self.admin.users.insert(user, password);
        }

        if let Ok(path) = std::env::var("POSTBOARD_LOAD_CSV") {
            self.import.csv_file = Some(PathBuf::from(path));
        }

        if let Ok(level) = std::env::var("POSTBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("POSTBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Check values that serde can't
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.users.keys().any(|user| user.is_empty()) {
            return Err(ConfigError::Invalid(
                "admin usernames must not be empty".to_string(),
            ));
        }

        let p = &self.pagination;

        if p.max_page_size == 0 || p.default_page_size == 0 || p.default_page_size > p.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "page sizes must satisfy 0 < default_page_size ({}) <= max_page_size ({})",
                p.default_page_size, p.max_page_size
            )));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Postboard Configuration
#
# Environment variables override these settings:
# - POSTBOARD_LISTEN
# - POSTBOARD_ADMIN_USER / POSTBOARD_ADMIN_PASSWORD
# - POSTBOARD_LOAD_CSV
# - POSTBOARD_LOG_LEVEL
# - POSTBOARD_LOG_FORMAT

[server]
# Address on which to start the HTTP server
listen = "127.0.0.1:1412"

[admin.users]
# Username = password, for the /admin API (HTTP Basic auth)
# admin = "change-me"

[import]
# Optional CSV file to load into the store after starting.
# Columns: id, name, email, text, created (RFC 3339)
# csv_file = "posts.csv"

# Whether the first record is a header to skip
has_header = true

[pagination]
# Page size when a list request doesn't give one
default_page_size = 100

# Largest page size a list request may ask for
max_page_size = 100

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "json"
"#
    .to_string()
}
