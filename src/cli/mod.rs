//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::ClusterState;

pub mod args;
pub mod cluster;
pub mod completions;
pub mod context;
pub mod handlers;
pub mod login;
pub mod node_pool;
pub mod status;

pub use args::{GlobalOptions, OutputFormat, WaitArgs};
use completions::state_candidates;
pub use context::CommandContext;

/// clusterwait - wait for cluster management API resources to become ready
#[derive(Parser, Debug)]
#[command(name = "clusterwait")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: from config, pretty]
    #[arg(
        long,
        global = true,
        env = "CLUSTERWAIT_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "CLUSTERWAIT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override API base URL
    #[arg(long, global = true, env = "CLUSTERWAIT_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Override SSO token endpoint
    #[arg(long, global = true, env = "CLUSTERWAIT_TOKEN_URL", hide_env = true)]
    pub token_url: Option<String>,

    /// Offline token to use instead of the configured one
    #[arg(long, global = true, env = "CLUSTERWAIT_TOKEN", hide_env = true)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CLUSTERWAIT_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save an offline token and verify it
    Login {
        /// Offline token (prompted for when omitted)
        #[arg(long = "offline-token")]
        offline_token: Option<String>,
    },

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Inspect and wait on clusters
    #[command(subcommand)]
    Cluster(ClusterCommands),

    /// Inspect and wait on node pools
    #[command(subcommand)]
    NodePool(NodePoolCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   clusterwait completion bash > /etc/bash_completion.d/clusterwait
  zsh:    clusterwait completion zsh > \"${fpath[1]}/_clusterwait\"
  fish:   clusterwait completion fish > ~/.config/fish/completions/clusterwait.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cluster subcommands
#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// Show a cluster
    Get {
        /// Cluster ID
        cluster_id: String,
    },

    /// Show the detailed status of a cluster
    Status {
        /// Cluster ID
        cluster_id: String,
    },

    /// Wait until a cluster reaches a state
    #[command(after_help = "\
Exit codes:
  0    the cluster reached an accepted state
  1    request, configuration or authentication failure,
       or the cluster entered the error state
  2    timed out
  130  interrupted")]
    Wait(ClusterWaitArgs),
}

/// Arguments for `cluster wait`
#[derive(Args, Debug, Clone)]
pub struct ClusterWaitArgs {
    /// Cluster ID
    pub cluster_id: String,

    /// Accepted state, repeatable [default: ready]
    #[arg(long = "state", value_name = "STATE", add = state_candidates())]
    pub states: Vec<ClusterState>,

    /// Wait until the cluster no longer exists (status 404)
    #[arg(long, conflicts_with_all = ["states", "statuses"])]
    pub gone: bool,

    #[command(flatten)]
    pub wait: WaitArgs,
}

/// Node pool subcommands
#[derive(Subcommand, Debug)]
pub enum NodePoolCommands {
    /// Show a node pool
    Get {
        /// Cluster ID
        cluster_id: String,
        /// Node pool ID
        node_pool_id: String,
    },

    /// Wait until a node pool has its desired replicas
    Wait {
        /// Cluster ID
        cluster_id: String,
        /// Node pool ID
        node_pool_id: String,

        #[command(flatten)]
        wait: WaitArgs,
    },
}
