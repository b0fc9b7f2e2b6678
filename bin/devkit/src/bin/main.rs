//! devkit: run project tasks against a configured network.
//!
//! Environment is read from `.env` (if present) before the configuration is
//! built. Task output goes to stdout; logs go to stderr.

use clap::Parser;
use devkit::{init_tracing, load_config, run_task, write_task_list};
use std::{io, path::PathBuf};
use task::TaskRegistry;

#[derive(Parser)]
#[command(name = "devkit")]
#[command(about = "Run project tasks against a configured network")]
struct Cli {
    /// Network to run the task against (defaults to the configured default network)
    #[arg(short, long)]
    network: Option<String>,

    /// Path to a TOML configuration file, replacing the built-in configuration
    #[arg(short, long, env = "DEVKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Task to run; lists the available tasks when omitted
    task: Option<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env_file = config::load_env_file();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);
    env_file.report();

    let config = load_config(cli.config.as_deref())?;
    let registry = TaskRegistry::with_builtins()?;

    let mut stdout = io::stdout();
    match cli.task {
        Some(task) => {
            run_task(
                &registry,
                &config,
                cli.network.as_deref(),
                &task,
                &mut stdout,
            )
            .await
        }
        None => write_task_list(&registry, &mut stdout),
    }
}
