//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, token handling, and client initialization.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, ClustersMgmtClient};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration, with flag and environment overrides applied
    pub config: Config,
    /// Authenticated API client
    pub client: Arc<ClustersMgmtClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// This handles:
    /// - Loading config (optional when `--token` supplies the credential)
    /// - Validating that some credential is present
    /// - Reusing a cached access token, or exchanging the offline token and
    ///   caching the result
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound)) if opts.token.is_some() => Config::default(),
            Err(err) => return Err(err),
        };

        // A token from the command line replaces whatever the file holds
        let token_override = opts.token.is_some();
        if let Some(token) = &opts.token {
            config.refresh_token = Some(token.clone());
            config.access_token = None;
        }
        config.validate_auth()?;

        let options = config.client_options(opts.api_url_ref(), opts.token_url_ref());
        debug!("Using API at {}", options.api_url);
        let client = ClustersMgmtClient::new(options, config.refresh_token.clone())?;

        if !config.is_token_expired() || config.refresh_token.is_none() {
            if let Some(token) = config.access_token.clone() {
                client.set_access_token(token).await;
            }
        } else if let Some(refresh_token) = config.refresh_token.clone() {
            let token = client.exchange_token(&refresh_token).await?;
            client.set_access_token(token.clone()).await;

            // Cache for future runs, but never persist a one-off --token
            if !token_override {
                config.access_token = Some(token);
                config.refresh_token = client.refresh_token().await;
                config.save_at(opts.config_ref())?;
            }
        }

        let format = opts.resolve_format(config.preferences.format.as_deref());
        Ok(Self {
            config,
            client: Arc::new(client),
            format,
        })
    }
}
