//! clusterwait CLI - wait for cluster management API resources to become ready

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;
use colored::Colorize;
use log::LevelFilter;

use clusterwait::cli::{self, Cli, ClusterCommands, Commands, GlobalOptions, NodePoolCommands};
use clusterwait::error::Result;

#[tokio::main]
async fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(err.exit_code());
    }
}

/// `RUST_LOG` controls logging, defaulting to warnings; `--debug` turns on
/// debug output for this crate.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("clusterwait", LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { offline_token } => cli::login::run(&opts, offline_token).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("clusterwait version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Cluster(cmd) => match cmd {
            ClusterCommands::Get { cluster_id } => cli::cluster::get(&opts, &cluster_id).await,
            ClusterCommands::Status { cluster_id } => {
                cli::cluster::status(&opts, &cluster_id).await
            }
            ClusterCommands::Wait(args) => cli::cluster::wait(&opts, &args).await,
        },
        Commands::NodePool(cmd) => match cmd {
            NodePoolCommands::Get {
                cluster_id,
                node_pool_id,
            } => cli::node_pool::get(&opts, &cluster_id, &node_pool_id).await,
            NodePoolCommands::Wait {
                cluster_id,
                node_pool_id,
                wait,
            } => cli::node_pool::wait(&opts, &cluster_id, &node_pool_id, &wait).await,
        },
        Commands::Completion { shell } => {
            cli::completions::generate(shell);
            Ok(())
        }
    }
}
