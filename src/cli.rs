use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::units::ClientShape;

#[derive(Parser, Debug)]
#[command(name = "chain-inspect", version, about = "EVM network and artifact diagnostics")]
pub struct Cli {
    /// Network profile to connect to (hardhat, localhost, sepolia, mainnet, ...)
    #[arg(long, global = true, default_value = "hardhat")]
    pub network: String,

    /// Override the RPC URL of the selected network
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// How the client hands out balances and fees (defaults to CLIENT_SHAPE or native)
    #[arg(long, global = true, value_enum)]
    pub client_shape: Option<ClientShape>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print chain identity, signer balance, latest block and fee figures
    CheckNetwork,
    /// Print the constructor parameters of a compiled contract
    ShowConstructor {
        /// Contract name, e.g. MockERC20 (falls back to CONTRACT_NAME)
        #[arg(long)]
        name: Option<String>,
        /// Artifact directory (falls back to ARTIFACTS_DIR, then ./artifacts)
        #[arg(long)]
        artifacts: Option<PathBuf>,
    },
    /// Print the signer accounts
    Accounts,
}
