//! Login command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, ClustersMgmtClient};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the login command
///
/// The offline token comes from `--offline-token`, then the global `--token`,
/// then an interactive prompt. It is verified by exchanging it for an access
/// token before anything is saved.
pub async fn run(opts: &GlobalOptions, offline_token: Option<String>) -> Result<()> {
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::NotFound)) => Config::default(),
        Err(err) => return Err(err),
    };

    let offline_token = match offline_token.or_else(|| opts.token.clone()) {
        Some(token) => token,
        None => {
            println!("{}", "Log in to the cluster management API".bold().green());
            println!(
                "Get an offline token at {}\n",
                "https://console.redhat.com/openshift/token".cyan()
            );
            Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Offline token")
                .interact()?
        }
    };
    let offline_token = offline_token.trim().to_string();
    if offline_token.is_empty() {
        return Err(ConfigError::MissingToken.into());
    }

    let options = config.client_options(opts.api_url_ref(), opts.token_url_ref());
    debug!("Exchanging offline token at {}", options.token_url);
    let client = ClustersMgmtClient::new(options.clone(), Some(offline_token.clone()))?;
    let access_token = client.exchange_token(&offline_token).await?;

    println!("{}", "✓ Authentication successful!".green());

    // Persist endpoint overrides so later commands talk to the same server
    config.api_url = options.api_url;
    config.token_url = options.token_url;
    config.refresh_token = Some(client.refresh_token().await.unwrap_or(offline_token));
    config.access_token = Some(access_token);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "clusterwait status".cyan());
    println!(
        "  {} - Wait for a cluster to be ready",
        "clusterwait cluster wait <ID>".cyan()
    );

    Ok(())
}
