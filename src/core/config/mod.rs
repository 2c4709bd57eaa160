//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`FLEXIPATCH_INSTANCE_URL`, `FLEXIPATCH_ACCESS_TOKEN`)
//! 4. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$FLEXIPATCH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/flexipatch/config.toml`
//! 3. `~/.flexipatch/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use flexipatch::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! if let Some(url) = config.instance_url() {
//!     println!("Instance: {}", url);
//! }
//! println!("API version: {}", config.api_version());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, OrgConfig, SecretsConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::org::salesforce::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FLEXIPATCH_CONFIG";

/// Environment variable overriding the instance URL.
pub const INSTANCE_URL_ENV: &str = "FLEXIPATCH_INSTANCE_URL";

/// Environment variable providing an access token.
pub const ACCESS_TOKEN_ENV: &str = "FLEXIPATCH_ACCESS_TOKEN";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Values taken from the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// `FLEXIPATCH_INSTANCE_URL`
    pub instance_url: Option<String>,
    /// `FLEXIPATCH_ACCESS_TOKEN`
    pub access_token: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment. Empty values are ignored.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            instance_url: read(INSTANCE_URL_ENV),
            access_token: read(ACCESS_TOKEN_ENV),
        }
    }
}

// Custom Debug to avoid exposing access_token
impl std::fmt::Debug for EnvOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvOverrides")
            .field("instance_url", &self.instance_url)
            .field("has_access_token", &self.access_token.is_some())
            .finish()
    }
}

/// Loaded configuration with environment overrides applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File configuration
    pub global: GlobalConfig,
    /// Environment overrides
    pub env: EnvOverrides,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from already-parsed parts.
    pub fn new(global: GlobalConfig, env: EnvOverrides) -> Self {
        Config {
            global,
            env,
            path: None,
        }
    }

    /// Load configuration from the default locations and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let (global, path) = Self::load_global()?;
        global.validate()?;

        Ok(Config {
            global,
            env: EnvOverrides::from_env(),
            path,
        })
    }

    /// Load configuration from a specific file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let global = Self::read_config(path)?;
        global.validate()?;

        Ok(Config {
            global,
            env: EnvOverrides::default(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Find and read the config file from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        for path in Self::candidate_paths() {
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // No config found, use defaults
        Ok((GlobalConfig::default(), None))
    }

    /// Config file locations in search order.
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("flexipatch/config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".flexipatch/config.toml"));
        }

        paths
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical write path.
    ///
    /// Returns `$FLEXIPATCH_CONFIG` if set, otherwise `~/.flexipatch/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".flexipatch/config.toml"))
    }

    /// Validate and write a config file atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename
        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn org(&self) -> Option<&OrgConfig> {
        self.global.org.as_ref()
    }

    /// Get the instance URL.
    ///
    /// The environment overrides the config file. Returns `None` if neither
    /// sets one.
    pub fn instance_url(&self) -> Option<&str> {
        self.env
            .instance_url
            .as_deref()
            .or_else(|| self.org().and_then(|o| o.instance_url.as_deref()))
    }

    /// Get the REST API version.
    ///
    /// Defaults to [`DEFAULT_API_VERSION`] if not configured.
    pub fn api_version(&self) -> &str {
        self.org()
            .and_then(|o| o.api_version.as_deref())
            .unwrap_or(DEFAULT_API_VERSION)
    }

    /// Get the HTTP request timeout.
    ///
    /// Defaults to [`DEFAULT_TIMEOUT`] if not configured.
    pub fn timeout(&self) -> Duration {
        self.org()
            .and_then(|o| o.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Configured username override.
    pub fn username(&self) -> Option<&str> {
        self.org().and_then(|o| o.username.as_deref())
    }

    /// Configured org id override.
    pub fn org_id(&self) -> Option<&str> {
        self.org().and_then(|o| o.org_id.as_deref())
    }

    /// Access token from the environment, if any.
    pub fn env_access_token(&self) -> Option<&str> {
        self.env.access_token.as_deref()
    }

    /// Get the secrets provider.
    ///
    /// Defaults to "file" if not configured.
    pub fn secrets_provider(&self) -> &str {
        self.global
            .secrets
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or("file")
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
