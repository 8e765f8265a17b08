//! Error types for the clusterwait CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for clusterwait operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Scripts can tell "gave up waiting" (2) and "interrupted" (130) apart
    /// from a failed request or a broken configuration (1).
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Poll(PollError::DeadlineExceeded { .. }) => 2,
            Error::Poll(PollError::Cancelled { .. }) => 130,
            _ => 1,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `clusterwait login` to set up your token.")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Access token is malformed or expired")]
    InvalidToken,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `clusterwait login` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("No API token configured. Run `clusterwait login` to set up your token.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Polling errors.
///
/// Retrieval failures are not represented here: they reach the caller as the
/// error the retrieval operation itself returned.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Polling requires a context with a deadline")]
    MissingDeadline,

    #[error("Polling interval must be greater than zero")]
    InvalidInterval,

    #[error("Timed out after {elapsed:?} ({attempts} attempts) waiting for an acceptable response")]
    DeadlineExceeded { attempts: u32, elapsed: Duration },

    #[error("Polling cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },

    #[error("Resource reached a state that will not recover: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("clusterwait login"));
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_api_error_token_exchange() {
        let err = ApiError::TokenExchange("invalid_grant".to_string());
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[test]
    fn test_config_error_missing_token() {
        let err = ConfigError::MissingToken;
        assert!(err.to_string().contains("clusterwait login"));
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: [yaml: content")
            .unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }

    #[test]
    fn test_poll_error_deadline_message() {
        let err = PollError::DeadlineExceeded {
            attempts: 5,
            elapsed: Duration::from_millis(50),
        };
        let msg = err.to_string();
        assert!(msg.contains("Timed out"));
        assert!(msg.contains("5 attempts"));
    }

    #[test]
    fn test_exit_codes() {
        let timeout: Error = PollError::DeadlineExceeded {
            attempts: 1,
            elapsed: Duration::from_secs(1),
        }
        .into();
        assert_eq!(timeout.exit_code(), 2);

        let cancelled: Error = PollError::Cancelled { attempts: 3 }.into();
        assert_eq!(cancelled.exit_code(), 130);

        let config: Error = PollError::MissingDeadline.into();
        assert_eq!(config.exit_code(), 1);

        let api: Error = ApiError::Unauthorized.into();
        assert_eq!(api.exit_code(), 1);
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::InvalidToken.into();

        match err {
            Error::Api(ApiError::InvalidToken) => (),
            _ => panic!("Expected Error::Api(ApiError::InvalidToken)"),
        }
    }
}
