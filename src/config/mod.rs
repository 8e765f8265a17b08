//! Configuration management for clusterwait

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::client::models::AccessToken;
use crate::client::{ClientOptions, DEFAULT_API_URL, DEFAULT_CLIENT_ID, DEFAULT_TOKEN_URL};
use crate::error::{ConfigError, Result};

/// Upper bound for `preferences.poll_interval`, one day
pub const MAX_POLL_INTERVAL_SECS: u64 = 86_400;

/// Upper bound for `preferences.poll_timeout`, thirty days
pub const MAX_POLL_TIMEOUT_SECS: u64 = 30 * 86_400;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// SSO token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// OAuth client ID used for token exchange
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Offline (refresh) token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Cached access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<AccessToken>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Seconds between poll attempts
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Seconds before a wait gives up
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
}

fn default_poll_interval() -> u64 {
    10
}

fn default_poll_timeout() -> u64 {
    1800
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            poll_interval: default_poll_interval(),
            poll_timeout: default_poll_timeout(),
        }
    }
}

impl Preferences {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout)
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".clusterwait").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override or the default path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an optional override or the default path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Tokens live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Reject settings the poller cannot use
    pub fn validate(&self) -> Result<()> {
        check_range(
            "preferences.poll_interval",
            self.preferences.poll_interval,
            MAX_POLL_INTERVAL_SECS,
        )?;
        check_range(
            "preferences.poll_timeout",
            self.preferences.poll_timeout,
            MAX_POLL_TIMEOUT_SECS,
        )
    }

    /// Check that some credential is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.refresh_token.is_none() && self.access_token.is_none() {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(())
    }

    /// Check if the cached access token is missing or expires within a minute
    pub fn is_token_expired(&self) -> bool {
        match &self.access_token {
            None => true,
            Some(token) => token.expires_within(chrono::Duration::minutes(1)),
        }
    }

    /// Client endpoints, with optional overrides from flags or environment
    pub fn client_options(&self, api_url: Option<&str>, token_url: Option<&str>) -> ClientOptions {
        ClientOptions {
            api_url: api_url.unwrap_or(&self.api_url).to_string(),
            token_url: token_url.unwrap_or(&self.token_url).to_string(),
            client_id: self.client_id.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_url: default_token_url(),
            client_id: default_client_id(),
            refresh_token: None,
            access_token: None,
            preferences: Preferences::default(),
        }
    }
}

fn check_range(key: &str, value: u64, max: u64) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{} must be at least 1", key)).into());
    }
    if value > max {
        return Err(ConfigError::Invalid(format!("{} must be at most {}", key, max)).into());
    }
    Ok(())
}
