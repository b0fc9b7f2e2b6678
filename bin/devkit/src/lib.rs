use client::NetworkClient;
use config::{ConfigBuilder, ProcessEnv, RootConfig};
use std::{io::Write, path::Path};
use task::{TaskContext, TaskError, TaskRegistry};
use tracing::info;

/// Install the global tracing subscriber, writing to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the configuration from `path`, or build it from the environment.
///
/// `DEVKIT_NETWORK` overrides the default network in both cases.
pub fn load_config(path: Option<&Path>) -> eyre::Result<RootConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading config: {}", path.display());
            let mut config = RootConfig::from_file(path)?;
            config.apply_env(&ProcessEnv);
            config
        }
        None => ConfigBuilder::from_env().build(),
    };

    Ok(config)
}

/// Write the registered tasks, one `name  description` line each.
pub fn write_task_list(registry: &TaskRegistry, out: &mut impl Write) -> eyre::Result<()> {
    let width = registry.tasks().map(|(name, _)| name.len()).max().unwrap_or(0);

    writeln!(out, "AVAILABLE TASKS:")?;
    writeln!(out)?;
    for (name, description) in registry.tasks() {
        writeln!(out, "  {name:<width$}  {description}")?;
    }

    Ok(())
}

/// Run the task called `name` against `network`, or the configured default
/// network.
///
/// The network's endpoint and credentials are validated here, before the
/// task handler runs. Network client errors surface as [`TaskError::Client`]
/// whether they happen while connecting or inside the handler.
pub async fn run_task(
    registry: &TaskRegistry,
    config: &RootConfig,
    network: Option<&str>,
    name: &str,
    out: &mut (dyn Write + Send),
) -> eyre::Result<()> {
    if !registry.contains(name) {
        return Err(TaskError::Unknown(name.to_string()).into());
    }

    let network = config.network(network.unwrap_or(&config.default_network))?;
    let client = NetworkClient::connect(network).map_err(TaskError::from)?;

    info!(
        task = name,
        network = %network.name,
        chain_id = network.chain_id,
        "Running task"
    );

    let mut ctx = TaskContext {
        network,
        signers: &client,
        out,
    };
    registry.run(name, &mut ctx).await?;

    Ok(())
}
