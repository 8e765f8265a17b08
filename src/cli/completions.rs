//! Shell completions for clusterwait
//!
//! `clusterwait completion <shell>` prints a static completion script.
//! Shells that source the dynamic completer (`COMPLETE=fish clusterwait`)
//! additionally get descriptions for `--state` values.
//!
//! Shell support:
//! - Fish/Zsh: Full support with descriptions
//! - Bash: Values only (no description display)

use std::io;

use clap::CommandFactory;
use clap_complete::Shell;
use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use crate::cli::Cli;
use crate::client::models::ClusterState;

/// Write the completion script for `shell` to stdout.
pub fn generate(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn state_help(state: ClusterState) -> &'static str {
    match state {
        ClusterState::Error => "provisioning or operation failed",
        ClusterState::Hibernating => "stopped to save cost",
        ClusterState::Installing => "being installed",
        ClusterState::Pending => "accepted, not yet provisioning",
        ClusterState::PoweringDown => "moving to hibernation",
        ClusterState::Ready => "installed and usable",
        ClusterState::Resuming => "waking from hibernation",
        ClusterState::Uninstalling => "being deleted",
        ClusterState::Validating => "checking the request",
        ClusterState::Waiting => "waiting for account resources",
        ClusterState::Unknown => "state not reported",
    }
}

/// Candidates for `--state`
pub fn complete_states() -> Vec<CompletionCandidate> {
    ClusterState::ALL
        .iter()
        .filter(|state| **state != ClusterState::Unknown)
        .map(|state| {
            CompletionCandidate::new(state.as_str()).help(Some(state_help(*state).into()))
        })
        .collect()
}

/// Completer for the `--state` argument
pub fn state_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_states)
}
