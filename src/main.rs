use std::io::Write;

use anyhow::Context;
use clap::Parser;

use chain_inspect::artifacts::FsArtifactStore;
use chain_inspect::cli::{Cli, Commands};
use chain_inspect::config::Config;
use chain_inspect::eth::EthClient;
use chain_inspect::{inspector, report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env(&cli.network);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::CheckNetwork => {
            let client = connect(&config, cli.rpc_url.as_deref())?;
            let shape = match cli.client_shape {
                Some(shape) => shape,
                None => config.client_shape().context("failed to load configuration")?,
            };
            tracing::debug!("formatting amounts with the {:?} client shape", shape);
            let units = shape.formatter();
            report::write_network_status(&client, units.as_ref(), &mut stdout).await?;
        }
        Commands::ShowConstructor { name, artifacts } => {
            let name = name.or(config.contract_name);
            let store = FsArtifactStore::new(artifacts.unwrap_or(config.artifacts_dir));
            inspector::write_constructor(&store, name.as_deref(), &mut stdout)?;
        }
        Commands::Accounts => {
            let client = connect(&config, cli.rpc_url.as_deref())?;
            report::write_accounts(&client, &mut stdout).await?;
        }
    }

    stdout.flush()?;
    Ok(())
}

fn connect(config: &Config, rpc_url: Option<&str>) -> anyhow::Result<EthClient> {
    let profile = config.network()?;
    let url = match rpc_url {
        Some(url) => url,
        None => config.require_rpc_url()?,
    };
    tracing::info!("connecting to network {}", profile.name);
    let client = EthClient::new(url, config.private_key.as_deref())?.with_profile(profile);
    Ok(client)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
