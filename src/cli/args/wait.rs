//! Polling arguments shared by `wait` commands

use std::time::Duration;

use clap::Args;

use crate::config::Preferences;

/// Parse a human duration such as `30s`, `5m` or `1h30m`.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    duration_str::parse(input).map_err(|e| format!("invalid duration '{}': {}", input, e))
}

/// Timing and acceptance flags for `wait` commands.
///
/// ```ignore
/// Wait {
///     #[command(flatten)]
///     wait: WaitArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct WaitArgs {
    /// Time between attempts, e.g. 10s or 1m [default: from config, 10s]
    #[arg(long, value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Give up after this long, e.g. 30m or 1h [default: from config, 30m]
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Acceptable HTTP status code, repeatable [default: 200]
    #[arg(long = "status", value_name = "CODE")]
    pub statuses: Vec<u16>,
}

/// Resolved polling settings
#[derive(Debug, Clone, PartialEq)]
pub struct WaitSettings {
    pub interval: Duration,
    pub timeout: Duration,
    pub statuses: Vec<u16>,
}

impl WaitArgs {
    /// Fill unset flags from config preferences.
    pub fn resolve(&self, prefs: &Preferences) -> WaitSettings {
        WaitSettings {
            interval: self.interval.unwrap_or_else(|| prefs.interval()),
            timeout: self.timeout.unwrap_or_else(|| prefs.timeout()),
            statuses: self.statuses.clone(),
        }
    }
}
