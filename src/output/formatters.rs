//! Reusable formatting utilities for CLI output
//!
//! Timestamps, durations and optional values as shown in pretty and table
//! output.

use std::time::Duration;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::client::models::ClusterState;

/// Placeholder for attributes the server did not send
pub const MISSING: &str = "--";

/// Format a timestamp in local time.
///
/// # Example output
/// `2025-01-15 14:30 -08:00`
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M %:z")
            .to_string(),
        None => MISSING.to_string(),
    }
}

/// Format a duration as a human-readable string.
///
/// # Example output
/// - `2h 15m 30s`
/// - `5m 10s`
/// - `45s`
/// - `0.25s` (below one second)
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        return format!("{:.2}s", duration.as_secs_f64());
    }

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format an optional flag, keeping "not sent" distinct from `false`.
pub fn format_flag(flag: Option<bool>) -> String {
    match flag {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => MISSING.to_string(),
    }
}

/// Format an optional value, or the missing placeholder.
pub fn or_missing<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Colorize a cluster state for terminal output.
pub fn colorize_state(state: Option<ClusterState>) -> String {
    match state {
        Some(ClusterState::Ready) => "ready".green().to_string(),
        Some(ClusterState::Error) => "error".red().bold().to_string(),
        Some(ClusterState::Unknown) | None => "unknown".dimmed().to_string(),
        Some(other) => other.as_str().yellow().to_string(),
    }
}

/// Render `label: value` lines with aligned, dimmed labels.
pub fn format_fields(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| {
            let padded = format!("{:<width$}", label, width = width);
            format!("{}  {}", padded.dimmed(), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
