//! Global CLI options shared across all commands
//!
//! Consolidates the global flags into one struct so handlers take a single
//! parameter instead of threading each flag through.

use clap::ValueEnum;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json), unset to use the config preference
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.clusterwait/config.yaml)
    pub config: Option<String>,

    /// API base URL override
    pub api_url: Option<String>,

    /// SSO token endpoint override
    pub token_url: Option<String>,

    /// Offline token override, used instead of the configured one
    pub token: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            token_url: cli.token_url.clone(),
            token: cli.token.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Resolve the output format: flag or environment, then the config
    /// preference, then pretty.
    pub fn resolve_format(&self, preference: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| preference.and_then(|f| OutputFormat::from_str(f, true).ok()))
            .unwrap_or_default()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn token_url_ref(&self) -> Option<&str> {
        self.token_url.as_deref()
    }
}
