//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order of precedence:
//! 1. `$FLEXIPATCH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/flexipatch/config.toml`
//! 3. `~/.flexipatch/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Values are validated after parsing: the instance URL must be an http(s)
//! URL, the API version must look like `60.0`, and the secrets provider must
//! be a known one.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// [org]
/// instance_url = "https://acme.my.salesforce.com"
/// api_version = "60.0"
/// timeout_secs = 30
///
/// [secrets]
/// provider = "file"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Org connection settings
    pub org: Option<OrgConfig>,

    /// Secret storage settings
    pub secrets: Option<SecretsConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(org) = &self.org {
            org.validate()?;
        }

        if let Some(secrets) = &self.secrets {
            secrets.validate()?;
        }

        Ok(())
    }
}

/// Org connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OrgConfig {
    /// Instance base URL
    pub instance_url: Option<String>,

    /// REST API version, e.g. "60.0"
    pub api_version: Option<String>,

    /// Username reported for the `Username` variable instead of the session's
    pub username: Option<String>,

    /// Org id reported for the `OrgId` variable instead of the session's
    pub org_id: Option<String>,

    /// HTTP request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl OrgConfig {
    /// Validate the org settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.instance_url {
            validate_instance_url(url)?;
        }

        if let Some(version) = &self.api_version {
            validate_api_version(version)?;
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Check that an instance URL is an http(s) URL.
pub fn validate_instance_url(url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(host) if !host.trim_end_matches('/').is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidValue(format!(
            "invalid instance_url '{}', expected https://<domain>",
            url
        ))),
    }
}

/// Check that an API version looks like `NN.N`.
pub fn validate_api_version(version: &str) -> Result<(), ConfigError> {
    let bare = version.strip_prefix('v').unwrap_or(version);
    let valid = match bare.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid api_version '{}', expected a version like 60.0",
            version
        )))
    }
}

/// Secrets configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Provider to use
    pub provider: Option<String>,
}

impl SecretsConfig {
    /// Valid secret providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file"];

    /// Validate the secrets configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}
