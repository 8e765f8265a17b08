//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::output::formatters::format_duration;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "clusterwait Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            // Offline token status
            if opts.token.is_some() {
                println!("{} Offline token supplied by --token", "✓".green());
            } else if config.refresh_token.is_some() {
                println!("{} Offline token configured", "✓".green());
            } else {
                println!("{} Offline token not configured", "✗".red());
                println!("  → Run 'clusterwait login' to configure");
            }

            // Access token status
            match config.access_token {
                Some(ref token) if !config.is_token_expired() => {
                    let remaining = token.expires_at.signed_duration_since(chrono::Utc::now());
                    println!(
                        "{} Access token valid (expires in {}m)",
                        "✓".green(),
                        remaining.num_minutes()
                    );
                }
                Some(_) => {
                    println!(
                        "{} Access token expired (will refresh on next command)",
                        "⚠".yellow()
                    );
                }
                None => {
                    println!(
                        "{} Access token not cached (will authenticate on next command)",
                        "○".dimmed()
                    );
                }
            }

            let options = config.client_options(opts.api_url_ref(), opts.token_url_ref());
            println!("{} API URL: {}", "○".dimmed(), options.api_url.cyan());
            println!("{} Token URL: {}", "○".dimmed(), options.token_url.cyan());

            println!();
            println!(
                "Poll interval: {}  Poll timeout: {}",
                format_duration(config.preferences.interval()).bold(),
                format_duration(config.preferences.timeout()).bold()
            );
            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!("  Looked in {}", config_path.display().to_string().dimmed());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "clusterwait login".cyan()
            );
            println!();
        }
    }

    Ok(())
}
